use std::collections::BTreeMap;

use serde::Deserialize;

use crate::collector::ToolPaths;
use crate::ifconfig::MediaUnitTable;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub publishing: PublishingConfig,
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Max number of snapshots kept in the broadcast channel for /ws/network (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub sample_interval_ms: u64,
    /// How often to log app stats (ws_network clients, samples taken/failed) at INFO level.
    pub stats_log_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_netstat")]
    pub netstat: String,
    #[serde(default = "default_ifconfig")]
    pub ifconfig: String,
}

fn default_netstat() -> String {
    "netstat".into()
}

fn default_ifconfig() -> String {
    "ifconfig".into()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            netstat: default_netstat(),
            ifconfig: default_ifconfig(),
        }
    }
}

impl ToolsConfig {
    pub fn paths(&self) -> ToolPaths {
        ToolPaths {
            netstat: self.netstat.clone(),
            ifconfig: self.ifconfig.clone(),
        }
    }
}

/// Extra media units on top of the built-in table, e.g. `GbaseER = 1000`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaConfig {
    #[serde(default)]
    pub units: BTreeMap<String, u64>,
}

impl MediaConfig {
    pub fn unit_table(&self) -> MediaUnitTable {
        let mut table = MediaUnitTable::default();
        for (unit, mbps) in &self.units {
            table.insert(unit, *mbps);
        }
        table
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            !self.tools.netstat.is_empty(),
            "tools.netstat must be non-empty"
        );
        anyhow::ensure!(
            !self.tools.ifconfig.is_empty(),
            "tools.ifconfig must be non-empty"
        );
        for (unit, mbps) in &self.media.units {
            anyhow::ensure!(
                !unit.is_empty(),
                "media.units keys must be non-empty"
            );
            anyhow::ensure!(*mbps > 0, "media.units.{} must be > 0, got {}", unit, mbps);
        }
        Ok(())
    }
}
