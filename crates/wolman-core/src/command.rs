// ── Commands ──
//
// User-triggered mutations. `Dashboard::execute` routes each one to a
// single backend call and always answers with a `Notification`.

use std::fmt;

use crate::model::{HostEdit, NewHost};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ── Wake-on-LAN ──────────────────────────────────────────────
    Wake { ip: String },
    /// Flip registration. `enabled` is the host's current state:
    /// `true` unregisters, `false` registers.
    ToggleWol { ip: String, enabled: bool },

    // ── Host inventory ───────────────────────────────────────────
    AddHost(NewHost),
    UpdateHost { ip: String, edit: HostEdit },
    DeleteHost { ip: String },
    /// Rescan one host and merge what the backend finds.
    Rediscover { ip: String },
    /// Ask the backend whether it could wake this host.
    TestWol { ip: String },

    // ── Discovery ────────────────────────────────────────────────
    StartDiscovery,
    StopDiscovery,
    /// Start or stop based on the last-fetched discovery status.
    ToggleDiscovery,
    /// One immediate scan, then reload hosts and statistics.
    ForceScan,
}

impl Command {
    /// Irreversible commands need an explicit confirmation first.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::DeleteHost { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wake { ip } => write!(f, "wake {ip}"),
            Self::ToggleWol { ip, enabled: true } => write!(f, "unregister {ip} from WOL"),
            Self::ToggleWol { ip, enabled: false } => write!(f, "register {ip} for WOL"),
            Self::AddHost(host) => write!(f, "add host {}", host.ip_address),
            Self::UpdateHost { ip, .. } => write!(f, "update host {ip}"),
            Self::DeleteHost { ip } => write!(f, "delete host {ip}"),
            Self::Rediscover { ip } => write!(f, "rediscover {ip}"),
            Self::TestWol { ip } => write!(f, "test WOL for {ip}"),
            Self::StartDiscovery => f.write_str("start discovery"),
            Self::StopDiscovery => f.write_str("stop discovery"),
            Self::ToggleDiscovery => f.write_str("toggle discovery"),
            Self::ForceScan => f.write_str("run discovery"),
        }
    }
}
