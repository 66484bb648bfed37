// Modal dialog models.
//
// Each modal copies what it shows at open time. Later store replacements
// never reach into an open modal; closing and reopening re-reads state.

use std::collections::BTreeMap;

use crate::ip_order::{parse_octets, sort_by_ip};
use crate::model::{Host, HostEdit, NewHost};
use crate::view::{RowAction, StatusBadge, inferred_label};

// ── Host details ────────────────────────────────────────────────────

/// Read-only snapshot of one host, with a hand-off to the edit flow.
#[derive(Debug, Clone, PartialEq)]
pub struct HostDetails {
    pub ip: String,
    pub title: String,
    pub status: StatusBadge,
    /// Label/value pairs in display order. Absent values render as `-`.
    pub fields: Vec<(&'static str, String)>,
    host: Host,
}

impl HostDetails {
    pub fn from_host(host: &Host) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
        let confidence = host
            .inference_confidence
            .map_or_else(|| "-".into(), |c| format!("{c:.0}%"));

        Self {
            ip: host.ip_address.clone(),
            title: host.display_name().to_string(),
            status: host.status.into(),
            fields: vec![
                ("IP Address", host.ip_address.clone()),
                ("Hostname", text(&host.hostname)),
                ("MAC Address", text(&host.mac_address)),
                ("Vendor", text(&host.vendor)),
                ("Device", inferred_label(host)),
                ("Device Type", text(&host.device_type)),
                ("OS Info", text(&host.os_info)),
                ("Confidence", confidence),
                ("Discovery", text(&host.discovery_method)),
                ("Last Seen", text(&host.last_seen)),
                ("WOL", if host.wol_enabled { "Enabled" } else { "Disabled" }.into()),
                ("Notes", text(&host.notes)),
            ],
            host: host.clone(),
        }
    }

    /// Prefilled edit form for the same host.
    pub fn edit_form(&self) -> HostForm {
        HostForm::edit(&self.host)
    }
}

// ── Add / edit form ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    /// Editing an existing host. The IP is the key and cannot change.
    Edit { ip: String },
}

/// A text field in the host form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
}

/// Checkbox key; present in the values map only while checked.
pub const WOL_FIELD: &str = "wol_enabled";

/// Flat key/value form shared by the add and edit dialogs.
///
/// Values persist across close/reopen until [`reset`](Self::reset) is
/// called, which the add dialog does on close.
#[derive(Debug, Clone, PartialEq)]
pub struct HostForm {
    pub mode: FormMode,
    values: BTreeMap<String, String>,
    /// Snapshot of the host as opened, for computing edits.
    original: Option<Host>,
}

impl HostForm {
    pub const FIELDS: &'static [FormField] = &[
        FormField { key: "ip_address", label: "IP Address" },
        FormField { key: "hostname", label: "Hostname" },
        FormField { key: "mac_address", label: "MAC Address" },
        FormField { key: "vendor", label: "Vendor" },
        FormField { key: "device_type", label: "Device Type" },
        FormField { key: "os_info", label: "OS Info" },
        FormField { key: "notes", label: "Notes" },
    ];

    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            values: BTreeMap::new(),
            original: None,
        }
    }

    pub fn edit(host: &Host) -> Self {
        let mut values = BTreeMap::new();
        let mut put = |key: &str, value: Option<&String>| {
            if let Some(v) = value {
                values.insert(key.to_string(), v.clone());
            }
        };
        put("ip_address", Some(&host.ip_address));
        put("hostname", host.hostname.as_ref());
        put("mac_address", host.mac_address.as_ref());
        put("vendor", host.vendor.as_ref());
        put("device_type", host.device_type.as_ref());
        put("os_info", host.os_info.as_ref());
        put("notes", host.notes.as_ref());
        if host.wol_enabled {
            values.insert(WOL_FIELD.into(), "on".into());
        }

        Self {
            mode: FormMode::Edit {
                ip: host.ip_address.clone(),
            },
            values,
            original: Some(host.clone()),
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    /// Set a text field. The IP cannot be changed while editing.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        if key == "ip_address" && matches!(self.mode, FormMode::Edit { .. }) {
            return;
        }
        self.values.insert(key.to_string(), value.into());
    }

    pub fn is_editable(&self, key: &str) -> bool {
        !(key == "ip_address" && matches!(self.mode, FormMode::Edit { .. }))
    }

    pub fn wol_checked(&self) -> bool {
        self.values.contains_key(WOL_FIELD)
    }

    pub fn toggle_wol(&mut self) {
        if self.values.remove(WOL_FIELD).is_none() {
            self.values.insert(WOL_FIELD.into(), "on".into());
        }
    }

    /// Clear every field and return to add mode.
    pub fn reset(&mut self) {
        *self = Self::add();
    }

    /// Raw submitted form data.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Client-side checks before submitting.
    pub fn validate(&self) -> Result<(), String> {
        let ip = self.get("ip_address").trim();
        if ip.is_empty() {
            return Err("IP address is required".into());
        }
        if parse_octets(ip).is_none() {
            return Err(format!("'{ip}' is not a valid IPv4 address"));
        }
        Ok(())
    }

    pub fn to_new_host(&self) -> NewHost {
        NewHost::from_form(&self.values)
    }

    /// Fields that differ from the host as it was when the form opened.
    /// A cleared field is sent as an empty string.
    pub fn to_edit(&self) -> HostEdit {
        let Some(original) = &self.original else {
            return HostEdit::default();
        };

        let changed = |key: &str, before: Option<&String>| {
            let now = self.get(key).trim();
            let before = before.map_or("", String::as_str);
            (now != before).then(|| now.to_string())
        };
        let wol = self.wol_checked();

        HostEdit {
            mac_address: changed("mac_address", original.mac_address.as_ref()),
            hostname: changed("hostname", original.hostname.as_ref()),
            vendor: changed("vendor", original.vendor.as_ref()),
            device_type: changed("device_type", original.device_type.as_ref()),
            os_info: changed("os_info", original.os_info.as_ref()),
            notes: changed("notes", original.notes.as_ref()),
            wol_enabled: (wol != original.wol_enabled).then_some(wol),
        }
    }
}

impl Default for HostForm {
    fn default() -> Self {
        Self::add()
    }
}

// ── WOL roster ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub ip: String,
    pub hostname: Option<String>,
    pub mac: Option<String>,
    pub status: StatusBadge,
    pub actions: Vec<RowAction>,
}

/// WOL-registered roster, fetched from its own endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WolRoster {
    pub rows: Vec<RosterRow>,
    /// Total inventory size reported alongside the roster, if any.
    pub total_hosts: Option<usize>,
}

impl WolRoster {
    pub fn new(mut hosts: Vec<Host>, total_hosts: Option<usize>) -> Self {
        sort_by_ip(&mut hosts, |h| h.ip_address.as_str());
        let rows = hosts
            .into_iter()
            .map(|h| {
                let mut actions = Vec::with_capacity(2);
                if h.has_mac() {
                    actions.push(RowAction::Wake);
                }
                actions.push(RowAction::Unregister);
                RosterRow {
                    ip: h.ip_address,
                    hostname: h.hostname,
                    mac: h.mac_address,
                    status: h.status.into(),
                    actions,
                }
            })
            .collect();

        Self { rows, total_hosts }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nas() -> Host {
        Host {
            ip_address: "10.0.0.20".into(),
            hostname: Some("nas".into()),
            mac_address: Some("AA:BB:CC:00:11:22".into()),
            wol_enabled: true,
            ..Host::default()
        }
    }

    #[test]
    fn add_form_persists_until_reset() {
        let mut form = HostForm::add();
        form.set("ip_address", "10.0.0.30");
        form.toggle_wol();

        let reopened = form.clone();
        assert_eq!(reopened.get("ip_address"), "10.0.0.30");
        assert!(reopened.wol_checked());

        form.reset();
        assert_eq!(form, HostForm::add());
    }

    #[test]
    fn unticked_checkbox_submits_false() {
        let mut form = HostForm::add();
        form.set("ip_address", "10.0.0.30");
        form.toggle_wol();
        form.toggle_wol();
        assert!(!form.to_new_host().wol_enabled);
    }

    #[test]
    fn validate_requires_ipv4() {
        let mut form = HostForm::add();
        assert!(form.validate().is_err());
        form.set("ip_address", "10.0.0.300");
        assert!(form.validate().is_err());
        form.set("ip_address", "10.0.0.3");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn edit_sends_only_changes() {
        let mut form = HostForm::edit(&nas());
        form.set("ip_address", "10.9.9.9");
        form.set("hostname", "nas-01");
        form.set("notes", "");
        form.toggle_wol();

        assert_eq!(form.get("ip_address"), "10.0.0.20");
        assert_eq!(
            form.to_edit(),
            HostEdit {
                hostname: Some("nas-01".into()),
                wol_enabled: Some(false),
                ..HostEdit::default()
            }
        );
    }

    #[test]
    fn untouched_edit_is_empty() {
        assert!(HostForm::edit(&nas()).to_edit().is_empty());
    }

    #[test]
    fn details_hand_off_to_edit() {
        let host = nas();
        let details = HostDetails::from_host(&host);
        assert_eq!(details.title, "nas");
        assert_eq!(
            details.edit_form().mode,
            FormMode::Edit {
                ip: "10.0.0.20".into()
            }
        );
    }

    #[test]
    fn roster_is_sorted_and_gates_wake() {
        let roster = WolRoster::new(
            vec![
                nas(),
                Host {
                    ip_address: "10.0.0.3".into(),
                    wol_enabled: true,
                    ..Host::default()
                },
            ],
            Some(12),
        );

        assert_eq!(roster.count(), 2);
        assert_eq!(roster.rows[0].ip, "10.0.0.3");
        assert_eq!(roster.rows[0].actions, vec![RowAction::Unregister]);
        assert_eq!(roster.rows[1].actions, vec![RowAction::Wake, RowAction::Unregister]);
        assert_eq!(roster.total_hosts, Some(12));
    }
}
