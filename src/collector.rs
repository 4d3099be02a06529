// Runs netstat/ifconfig and reconciles their output into interface records.

use std::future::Future;

use thiserror::Error;
use tracing::instrument;

use crate::ifconfig::{MediaUnitTable, merge_ifconfig_output, parse_interface_list};
use crate::models::InterfaceRecord;
use crate::netstat::{NameUsage, NetstatRow, ParseError, Resolution, aggregate, parse_netstat_output};

/// netstat flags: interface stats, bytes, drops, numeric, wide names.
const NETSTAT_ARGS: &str = "-ibdnW";

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code:?}: {stderr}")]
    Status {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("netstat output: {0}")]
    Parse(#[from] ParseError),
}

/// Runs a system tool and returns its stdout.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        program: &str,
        args: &[&str],
    ) -> impl Future<Output = Result<String, CollectError>> + Send;
}

/// Runs tools as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String, CollectError> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| CollectError::Spawn {
                program: program.to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(CollectError::Status {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Paths (or names on `PATH`) of the tools to invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub netstat: String,
    pub ifconfig: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            netstat: "netstat".into(),
            ifconfig: "ifconfig".into(),
        }
    }
}

pub struct Collector<R> {
    runner: R,
    tools: ToolPaths,
    units: MediaUnitTable,
}

impl<R: CommandRunner> Collector<R> {
    pub fn new(runner: R, tools: ToolPaths, units: MediaUnitTable) -> Self {
        Self {
            runner,
            tools,
            units,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Per-interface counters with link speeds.
    ///
    /// netstat failures are errors. A failing `ifconfig` only costs the speeds.
    #[instrument(skip(self), fields(operation = "io_counters"))]
    pub async fn io_counters(&self) -> Result<Vec<InterfaceRecord>, CollectError> {
        let output = self.runner.run(&self.tools.netstat, &[NETSTAT_ARGS]).await?;
        let rows = parse_netstat_output(&output)?;
        let usage = NameUsage::new(&rows);

        let mut records = if usage.is_truncated() {
            self.query_truncated(&rows, &usage).await?
        } else {
            aggregate(&rows, &usage)
        };

        match self.runner.run(&self.tools.ifconfig, &[]).await {
            Ok(ifconfig) => merge_ifconfig_output(&ifconfig, &mut records, &self.units),
            Err(e) => tracing::warn!(
                error = %e,
                operation = "ifconfig",
                "link speeds unavailable"
            ),
        }
        Ok(records)
    }

    /// netstat cut some names: list full names with `ifconfig -l` and query
    /// netstat per interface for every name the first pass can't account for.
    async fn query_truncated(
        &self,
        rows: &[NetstatRow],
        usage: &NameUsage,
    ) -> Result<Vec<InterfaceRecord>, CollectError> {
        tracing::debug!(
            truncated = ?usage.truncated(),
            "netstat truncated interface names; querying per interface"
        );
        let listing = self.runner.run(&self.tools.ifconfig, &["-l"]).await?;
        let mut records = Vec::new();

        for name in parse_interface_list(&listing) {
            if let Some(Resolution::Single { link_row }) = usage.resolution(&name) {
                records.push(rows[link_row].stat.to_record());
                continue;
            }
            let flag = format!("{NETSTAT_ARGS}I{name}");
            let output = self.runner.run(&self.tools.netstat, &[flag.as_str()]).await?;
            let iface_rows = parse_netstat_output(&output)?;
            match iface_rows.iter().find(|r| r.link_id().is_some()) {
                Some(row) => {
                    let mut record = row.stat.to_record();
                    record.name = name;
                    records.push(record);
                }
                None => tracing::debug!(interface = %name, "interface gone before it was queried"),
            }
        }
        Ok(records)
    }
}
