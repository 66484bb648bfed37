use std::collections::BTreeMap;

use strum::{AsRefStr, Display};

/// Reachability as last reported by discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum HostStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

impl HostStatus {
    /// Lenient parse: anything unrecognized is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" => Self::Online,
            "offline" => Self::Offline,
            _ => Self::Unknown,
        }
    }
}

/// A discovered or manually added host. `ip_address` is the unique key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Host {
    pub ip_address: String,
    pub hostname: Option<String>,
    pub mac_address: Option<String>,
    pub status: HostStatus,
    pub wol_enabled: bool,
    pub vendor: Option<String>,
    pub device_type: Option<String>,
    pub inferred_os: Option<String>,
    pub inferred_device_type: Option<String>,
    /// Percentage, 0-100.
    pub inference_confidence: Option<f64>,
    pub discovery_method: Option<String>,
    pub last_seen: Option<String>,
    pub notes: Option<String>,
    pub os_info: Option<String>,
}

impl Host {
    /// WOL actions (wake, register) require a hardware address.
    pub fn has_mac(&self) -> bool {
        self.mac_address.is_some()
    }

    /// Hostname if known, IP otherwise.
    pub fn display_name(&self) -> &str {
        self.hostname.as_deref().unwrap_or(&self.ip_address)
    }
}

// ── Requests ────────────────────────────────────────────────────────

/// A host to create from the add-host form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewHost {
    pub ip_address: String,
    pub mac_address: Option<String>,
    pub hostname: Option<String>,
    pub vendor: Option<String>,
    pub device_type: Option<String>,
    pub os_info: Option<String>,
    pub notes: Option<String>,
    pub wol_enabled: bool,
}

impl NewHost {
    /// Build from flat form data.
    ///
    /// Blank values are treated as absent. A missing `wol_enabled` key means
    /// the checkbox was unticked, so it is `false` rather than unset.
    pub fn from_form(form: &BTreeMap<String, String>) -> Self {
        let field = |key: &str| {
            form.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            ip_address: field("ip_address").unwrap_or_default(),
            mac_address: field("mac_address"),
            hostname: field("hostname"),
            vendor: field("vendor"),
            device_type: field("device_type"),
            os_info: field("os_info"),
            notes: field("notes"),
            wol_enabled: form.get("wol_enabled").is_some_and(|v| checkbox_value(v)),
        }
    }
}

/// Fields to change on an existing host. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostEdit {
    pub mac_address: Option<String>,
    pub hostname: Option<String>,
    pub vendor: Option<String>,
    pub device_type: Option<String>,
    pub os_info: Option<String>,
    pub notes: Option<String>,
    pub wol_enabled: Option<bool>,
}

impl HostEdit {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// HTML-style checkbox semantics: present with a truthy value means checked.
fn checkbox_value(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn missing_checkbox_is_false() {
        let host = NewHost::from_form(&form(&[("ip_address", "10.0.0.4")]));
        assert!(!host.wol_enabled);
    }

    #[test]
    fn checked_checkbox_is_true() {
        let host = NewHost::from_form(&form(&[
            ("ip_address", "10.0.0.4"),
            ("wol_enabled", "on"),
        ]));
        assert!(host.wol_enabled);
    }

    #[test]
    fn blank_fields_are_absent() {
        let host = NewHost::from_form(&form(&[
            ("ip_address", " 10.0.0.4 "),
            ("hostname", "   "),
            ("mac_address", "AA:BB:CC:DD:EE:FF"),
        ]));
        assert_eq!(host.ip_address, "10.0.0.4");
        assert_eq!(host.hostname, None);
        assert_eq!(host.mac_address.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
    }

    #[test]
    fn status_parse_is_lenient() {
        assert_eq!(HostStatus::parse("Online"), HostStatus::Online);
        assert_eq!(HostStatus::parse("offline"), HostStatus::Offline);
        assert_eq!(HostStatus::parse("sleeping"), HostStatus::Unknown);
        assert_eq!(HostStatus::Online.to_string(), "online");
    }
}
