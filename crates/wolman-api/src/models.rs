// Wire types for the WOLManager REST API.
//
// Field names match the backend's JSON exactly. Everything the backend may
// omit or null out is an `Option`; domain conversion happens in `wolman-core`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A host record as returned by `GET /hosts` and friends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    pub ip_address: String,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub os_info: Option<String>,
    #[serde(default)]
    pub discovery_method: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub wol_enabled: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub inferred_os: Option<String>,
    #[serde(default)]
    pub inferred_device_type: Option<String>,
    #[serde(default)]
    pub inference_confidence: Option<f64>,
}

/// Body for `POST /hosts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostCreate {
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_info: Option<String>,
    pub wol_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `PUT /hosts/{ip}`. Only populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wol_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// `GET /hosts/wol-registered`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WolRosterResponse {
    pub hosts: Vec<HostResponse>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub total_hosts: Option<usize>,
}

/// `POST /hosts/{ip}/register-wol` and `/unregister-wol`
#[derive(Debug, Clone, Deserialize)]
pub struct WolRegistrationResponse {
    pub message: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub wol_enabled: Option<bool>,
}

/// `POST /wol/wake/{ip}`. Success is decided by the body, not the HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct WakeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
}

/// `POST /wol/test/{ip}`. A host that cannot be woken is still a 200.
#[derive(Debug, Clone, Deserialize)]
pub struct WolTestResponse {
    #[serde(default)]
    pub ip_address: Option<String>,
    pub wol_capable: bool,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub mac_address: Option<String>,
}

/// `GET /discovery/status`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default)]
    pub interval: Option<u64>,
}

/// `GET /discovery/statistics`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default)]
    pub total_hosts: Option<u64>,
    #[serde(default)]
    pub by_discovery_method: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_device_type: BTreeMap<String, u64>,
}

/// Generic `{"message": "..."}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
