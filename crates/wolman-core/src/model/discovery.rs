use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use strum::{AsRefStr, Display};

/// Canonical discovery-process state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum DiscoveryState {
    Running,
    Stopped,
    Error,
    #[default]
    Unknown,
}

impl DiscoveryState {
    /// The backend writes `"running"`, `"stopped"`, or `"error: <message>"`.
    pub fn parse(raw: &str) -> (Self, Option<String>) {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        match lower.as_str() {
            "running" => (Self::Running, None),
            "stopped" | "idle" => (Self::Stopped, None),
            _ if lower.starts_with("error") => {
                let message = trimmed
                    .get("error".len()..)
                    .map(|rest| rest.trim_start_matches(':').trim())
                    .filter(|rest| !rest.is_empty())
                    .map(String::from);
                (Self::Error, message)
            }
            _ => (Self::Unknown, None),
        }
    }
}

/// Last-fetched discovery status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryStatus {
    pub state: DiscoveryState,
    /// Message carried by an `error: ...` status.
    pub error_message: Option<String>,
    pub last_run: Option<NaiveDateTime>,
    /// Seconds between background discovery runs.
    pub interval: u64,
}

impl DiscoveryStatus {
    pub const DEFAULT_INTERVAL: u64 = 300;
}

impl Default for DiscoveryStatus {
    /// The fail-safe value used when the status endpoint cannot be read.
    fn default() -> Self {
        Self {
            state: DiscoveryState::Unknown,
            error_message: None,
            last_run: None,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// Aggregate host counts for the chart pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total_hosts: Option<u64>,
    pub by_discovery_method: BTreeMap<String, u64>,
    pub by_status: BTreeMap<String, u64>,
    pub by_device_type: BTreeMap<String, u64>,
}
