// Human label for a host's OS / device kind.
//
// Inference results win when present; otherwise the legacy `device_type`
// string is prettified, with `dhcp_lease_<state>[_<kind>]` unpacked.

use crate::model::Host;

const LEASE_PREFIX: &str = "dhcp_lease_";

/// Confidence at or below this is not worth showing.
pub const CONFIDENCE_THRESHOLD: f64 = 50.0;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Label shown in the "OS / Device" column.
pub fn inferred_label(host: &Host) -> String {
    let inferred: Vec<&str> = [&host.inferred_os, &host.inferred_device_type]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .collect();

    if !inferred.is_empty() {
        let mut label = inferred.join(" / ");
        if let Some(confidence) = host
            .inference_confidence
            .filter(|c| *c > CONFIDENCE_THRESHOLD)
        {
            label.push_str(&format!(" ({confidence:.0}%)"));
        }
        return label;
    }

    host.device_type
        .as_deref()
        .map_or_else(|| UNKNOWN_LABEL.to_string(), legacy_label)
}

/// Prettify a legacy `device_type` value.
pub fn legacy_label(device_type: &str) -> String {
    let Some(rest) = device_type.strip_prefix(LEASE_PREFIX) else {
        let titled = title_case(device_type);
        return if titled.is_empty() {
            UNKNOWN_LABEL.to_string()
        } else {
            titled
        };
    };

    match rest.split_once('_') {
        Some((state, kind)) if !kind.is_empty() => {
            format!("{} (DHCP {state})", title_case(kind))
        }
        _ if rest.trim_end_matches('_').is_empty() => "DHCP Lease".to_string(),
        _ => format!("DHCP Lease ({})", rest.trim_end_matches('_')),
    }
}

fn title_case(raw: &str) -> String {
    raw.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> Host {
        Host {
            ip_address: "10.0.0.1".into(),
            ..Host::default()
        }
    }

    #[test]
    fn inferred_with_confident_annotation() {
        let h = Host {
            inferred_os: Some("Windows".into()),
            inferred_device_type: Some("Workstation".into()),
            inference_confidence: Some(87.0),
            ..host()
        };
        assert_eq!(inferred_label(&h), "Windows / Workstation (87%)");
    }

    #[test]
    fn low_confidence_is_not_annotated() {
        let h = Host {
            inferred_os: Some("Linux".into()),
            inference_confidence: Some(50.0),
            ..host()
        };
        assert_eq!(inferred_label(&h), "Linux");
    }

    #[test]
    fn dhcp_lease_with_kind() {
        insta::assert_snapshot!(legacy_label("dhcp_lease_bound_windows_pc"), @"Windows Pc (DHCP bound)");
    }

    #[test]
    fn dhcp_lease_without_kind() {
        assert_eq!(legacy_label("dhcp_lease_waiting"), "DHCP Lease (waiting)");
        assert_eq!(legacy_label("dhcp_lease_"), "DHCP Lease");
    }

    #[test]
    fn plain_device_type_is_title_cased() {
        let h = Host {
            device_type: Some("network_printer".into()),
            ..host()
        };
        assert_eq!(inferred_label(&h), "Network Printer");
    }

    #[test]
    fn nothing_known_is_unknown() {
        assert_eq!(inferred_label(&host()), "Unknown");
    }
}
