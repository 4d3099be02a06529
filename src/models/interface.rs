// Per-interface counter models

use serde::{Deserialize, Serialize};

/// Final per-interface record: absolute counters at sample time plus link speed.
///
/// Speeds are in Mbit/s and stay 0 when the interface has no selectable medium.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceRecord {
    pub name: String,
    #[serde(default = "default_is_up")]
    pub is_up: bool,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errin: u64,
    pub errout: u64,
    #[serde(default)]
    pub dropout: u64,
    #[serde(default)]
    pub transmit_speed: u64,
    #[serde(default)]
    pub receive_speed: u64,
}

fn default_is_up() -> bool {
    true
}

impl InterfaceRecord {
    /// Stub with only the name populated, ready for a speed merge.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_up: true,
            ..Default::default()
        }
    }
}

/// One sampling pass over all interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSnapshot {
    pub timestamp: u64,
    pub interfaces: Vec<InterfaceRecord>,
}
