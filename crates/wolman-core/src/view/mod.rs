// ── View model ──
//
// Pure derivation of everything the dashboard tables show from one host
// snapshot: search filtering, the registered/unregistered partition (each
// IP-sorted), typed row descriptors, and summary counters. Rendering
// adapters only map these descriptors onto widgets.

pub mod label;
pub mod modal;

use crate::ip_order::compare_ip;
use crate::model::{Host, HostStatus};

pub use label::inferred_label;
pub use modal::{FormMode, HostDetails, HostForm, RosterRow, WolRoster};

// ── Badges & actions ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Red,
    Gray,
}

/// Status badge: online is green, offline red, anything else gray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub status: HostStatus,
}

impl StatusBadge {
    pub fn color(self) -> BadgeColor {
        match self.status {
            HostStatus::Online => BadgeColor::Green,
            HostStatus::Offline => BadgeColor::Red,
            HostStatus::Unknown => BadgeColor::Gray,
        }
    }

    pub fn label(self) -> &'static str {
        match self.status {
            HostStatus::Online => "Online",
            HostStatus::Offline => "Offline",
            HostStatus::Unknown => "Unknown",
        }
    }
}

impl From<HostStatus> for StatusBadge {
    fn from(status: HostStatus) -> Self {
        Self { status }
    }
}

/// A per-row control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Wake,
    Register,
    /// Shown in place of `Register` when the host has no MAC address.
    RegisterDisabled,
    Unregister,
    Details,
    Edit,
    Delete,
}

impl RowAction {
    pub fn is_enabled(self) -> bool {
        self != Self::RegisterDisabled
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Wake => "Wake",
            Self::Register | Self::RegisterDisabled => "Register",
            Self::Unregister => "Unregister",
            Self::Details => "Details",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

// ── Rows ────────────────────────────────────────────────────────────

/// Row in the WOL-registered table.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredRow {
    pub ip: String,
    pub hostname: Option<String>,
    pub mac: Option<String>,
    pub status: StatusBadge,
    pub actions: Vec<RowAction>,
}

impl RegisteredRow {
    fn from_host(host: &Host) -> Self {
        let mut actions = Vec::with_capacity(3);
        if host.has_mac() {
            actions.push(RowAction::Wake);
        }
        actions.extend([RowAction::Unregister, RowAction::Edit]);

        Self {
            ip: host.ip_address.clone(),
            hostname: host.hostname.clone(),
            mac: host.mac_address.clone(),
            status: host.status.into(),
            actions,
        }
    }
}

/// Row in the "other hosts" table.
#[derive(Debug, Clone, PartialEq)]
pub struct UnregisteredRow {
    pub ip: String,
    pub hostname: Option<String>,
    pub mac: Option<String>,
    pub vendor: Option<String>,
    /// Inferred OS / device label.
    pub device: String,
    pub status: StatusBadge,
    pub actions: Vec<RowAction>,
}

impl UnregisteredRow {
    fn from_host(host: &Host) -> Self {
        let register = if host.has_mac() {
            RowAction::Register
        } else {
            RowAction::RegisterDisabled
        };

        Self {
            ip: host.ip_address.clone(),
            hostname: host.hostname.clone(),
            mac: host.mac_address.clone(),
            vendor: host.vendor.clone(),
            device: inferred_label(host),
            status: host.status.into(),
            actions: vec![register, RowAction::Details, RowAction::Edit, RowAction::Delete],
        }
    }
}

/// One table body. An empty body shows the placeholder instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<R> {
    pub rows: Vec<R>,
}

impl<R> TableView<R> {
    pub fn show_placeholder(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Summary counters. `registered` and `wol_enabled` are the same figure
/// shown in two places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub registered: usize,
    pub wol_enabled: usize,
    pub total: usize,
    pub online: usize,
}

impl Counters {
    fn from_hosts<'a>(hosts: impl IntoIterator<Item = &'a Host>) -> Self {
        let mut counters = Self::default();
        for host in hosts {
            counters.total += 1;
            if host.wol_enabled {
                counters.registered += 1;
            }
            if host.status == HostStatus::Online {
                counters.online += 1;
            }
        }
        counters.wol_enabled = counters.registered;
        counters
    }
}

/// The complete table-side render of one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct HostTables {
    pub registered: TableView<RegisteredRow>,
    pub unregistered: TableView<UnregisteredRow>,
    pub counters: Counters,
    /// Whether a non-empty search term shaped this render.
    pub filtered: bool,
}

impl HostTables {
    pub fn registered_ips(&self) -> Vec<&str> {
        self.registered.rows.iter().map(|r| r.ip.as_str()).collect()
    }

    pub fn unregistered_ips(&self) -> Vec<&str> {
        self.unregistered.rows.iter().map(|r| r.ip.as_str()).collect()
    }
}

impl Default for HostTables {
    fn default() -> Self {
        render_tables(&[], &SearchFilter::default())
    }
}

// ── Filtering ───────────────────────────────────────────────────────

/// Case-insensitive substring filter over IP, hostname and MAC.
///
/// The term is matched literally, spaces included; a blank term means no
/// filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    pub fn new(term: &str) -> Self {
        let needle = if term.trim().is_empty() {
            String::new()
        } else {
            term.to_lowercase()
        };
        Self { needle }
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    pub fn term(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, host: &Host) -> bool {
        if !self.is_active() {
            return true;
        }
        let hit = |field: &str| field.to_lowercase().contains(&self.needle);
        hit(&host.ip_address)
            || host.hostname.as_deref().is_some_and(hit)
            || host.mac_address.as_deref().is_some_and(hit)
    }
}

// ── Partition & render ──────────────────────────────────────────────

/// Split into (WOL-registered, other), each sorted by IP.
pub fn partition(hosts: &[Host]) -> (Vec<&Host>, Vec<&Host>) {
    let (mut registered, mut other): (Vec<&Host>, Vec<&Host>) =
        hosts.iter().partition(|h| h.wol_enabled);
    registered.sort_by(|a, b| compare_ip(&a.ip_address, &b.ip_address));
    other.sort_by(|a, b| compare_ip(&a.ip_address, &b.ip_address));
    (registered, other)
}

/// Render both tables and the counters.
///
/// With an inactive filter this is exactly the unfiltered render; with an
/// active one, rows and counters come from the matching subset.
pub fn render_tables(hosts: &[Host], filter: &SearchFilter) -> HostTables {
    let visible: Vec<Host>;
    let source: &[Host] = if filter.is_active() {
        visible = hosts.iter().filter(|h| filter.matches(h)).cloned().collect();
        &visible
    } else {
        hosts
    };

    let (registered, other) = partition(source);

    HostTables {
        registered: TableView {
            rows: registered.into_iter().map(RegisteredRow::from_host).collect(),
        },
        unregistered: TableView {
            rows: other.into_iter().map(UnregisteredRow::from_host).collect(),
        },
        counters: Counters::from_hosts(source),
        filtered: filter.is_active(),
    }
}
