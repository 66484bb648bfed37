// ── API-to-domain type conversions ──
//
// Bridges raw `wolman-api` response types into canonical `wolman-core`
// domain types. Blank strings from the backend are treated as absent.

use chrono::{DateTime, NaiveDateTime};
use tracing::debug;
use wolman_api::models::{
    DiscoveryStatusResponse, HostCreate, HostResponse, HostUpdate, StatisticsResponse,
};

use crate::model::{DiscoveryState, DiscoveryStatus, Host, HostEdit, HostStatus, NewHost, Statistics};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse the backend's naive ISO timestamp (`2024-05-01T12:30:00.123456`),
/// tolerating an RFC 3339 offset.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

// ── Host ────────────────────────────────────────────────────────────

impl From<HostResponse> for Host {
    fn from(h: HostResponse) -> Self {
        Self {
            ip_address: h.ip_address.trim().to_string(),
            hostname: non_empty(h.hostname),
            mac_address: non_empty(h.mac_address),
            status: h.status.as_deref().map_or(HostStatus::Unknown, HostStatus::parse),
            wol_enabled: h.wol_enabled,
            vendor: non_empty(h.vendor),
            device_type: non_empty(h.device_type),
            inferred_os: non_empty(h.inferred_os),
            inferred_device_type: non_empty(h.inferred_device_type),
            inference_confidence: h.inference_confidence,
            discovery_method: non_empty(h.discovery_method),
            last_seen: non_empty(h.last_seen),
            notes: non_empty(h.notes),
            os_info: non_empty(h.os_info),
        }
    }
}

impl From<NewHost> for HostCreate {
    fn from(h: NewHost) -> Self {
        Self {
            ip_address: h.ip_address,
            mac_address: h.mac_address,
            hostname: h.hostname,
            vendor: h.vendor,
            device_type: h.device_type,
            os_info: h.os_info,
            wol_enabled: h.wol_enabled,
            notes: h.notes,
        }
    }
}

impl From<HostEdit> for HostUpdate {
    fn from(e: HostEdit) -> Self {
        Self {
            mac_address: e.mac_address,
            hostname: e.hostname,
            vendor: e.vendor,
            device_type: e.device_type,
            os_info: e.os_info,
            status: None,
            wol_enabled: e.wol_enabled,
            notes: e.notes,
        }
    }
}

// ── Discovery ───────────────────────────────────────────────────────

impl From<DiscoveryStatusResponse> for DiscoveryStatus {
    fn from(r: DiscoveryStatusResponse) -> Self {
        let (state, error_message) = r
            .status
            .as_deref()
            .map_or((DiscoveryState::Unknown, None), DiscoveryState::parse);

        let last_run = r.last_run.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                debug!(last_run = raw, "unparseable discovery timestamp");
            }
            parsed
        });

        Self {
            state,
            error_message,
            last_run,
            interval: r.interval.unwrap_or(Self::DEFAULT_INTERVAL),
        }
    }
}

impl From<StatisticsResponse> for Statistics {
    fn from(r: StatisticsResponse) -> Self {
        Self {
            total_hosts: r.total_hosts,
            by_discovery_method: r.by_discovery_method,
            by_status: r.by_status,
            by_device_type: r.by_device_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_mac_is_absent() {
        let host = Host::from(HostResponse {
            ip_address: "10.0.0.1".into(),
            mac_address: Some(String::new()),
            status: Some("weird".into()),
            ..HostResponse::default()
        });
        assert!(!host.has_mac());
        assert_eq!(host.status, HostStatus::Unknown);
    }

    #[test]
    fn status_response_defaults_interval() {
        let status = DiscoveryStatus::from(DiscoveryStatusResponse {
            status: Some("error: scan failed".into()),
            last_run: Some("2024-05-01T12:30:00.123456".into()),
            interval: None,
        });
        assert_eq!(status.state, DiscoveryState::Error);
        assert_eq!(status.error_message.as_deref(), Some("scan failed"));
        assert_eq!(status.interval, 300);
        assert_eq!(
            status.last_run.map(|t| t.format("%H:%M").to_string()),
            Some("12:30".into())
        );
    }

    #[test]
    fn unset_status_is_unknown() {
        let status = DiscoveryStatus::from(DiscoveryStatusResponse::default());
        assert_eq!(status, DiscoveryStatus::default());
    }
}
