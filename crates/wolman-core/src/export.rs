// ── CSV export ──
//
// Writes the inventory, IP-sorted, with a fixed header. Absent fields are
// empty strings and booleans are `Yes`/`No`.

use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::CoreError;
use crate::ip_order::compare_ip;
use crate::model::Host;

pub const EXPORT_FILE_NAME: &str = "wolmanager-hosts.csv";

pub const HEADER: [&str; 6] = [
    "IP Address",
    "Hostname",
    "MAC Address",
    "Status",
    "Device Type",
    "WOL Enabled",
];

/// Write `hosts` as CSV into any writer.
pub fn write_csv<W: io::Write>(hosts: &[Host], writer: W) -> Result<(), CoreError> {
    let mut sorted: Vec<&Host> = hosts.iter().collect();
    sorted.sort_by(|a, b| compare_ip(&a.ip_address, &b.ip_address));

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for host in sorted {
        wtr.write_record([
            host.ip_address.as_str(),
            host.hostname.as_deref().unwrap_or_default(),
            host.mac_address.as_deref().unwrap_or_default(),
            host.status.as_ref(),
            host.device_type.as_deref().unwrap_or_default(),
            if host.wol_enabled { "Yes" } else { "No" },
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render the export in memory.
pub fn to_csv_string(hosts: &[Host]) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    write_csv(hosts, &mut buf)?;
    String::from_utf8(buf).map_err(|e| CoreError::Export(e.to_string()))
}

/// Write `wolmanager-hosts.csv` into `dir`, returning the full path.
pub fn export_to_dir(hosts: &[Host], dir: &Path) -> Result<PathBuf, CoreError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    let file = std::fs::File::create(&path)?;
    write_csv(hosts, file)?;
    info!(path = %path.display(), count = hosts.len(), "exported hosts");
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::HostStatus;

    #[test]
    fn exact_row_format() {
        let hosts = vec![Host {
            ip_address: "192.168.1.10".into(),
            hostname: Some("srv".into()),
            mac_address: Some("AA:BB:CC:DD:EE:FF".into()),
            status: HostStatus::Online,
            device_type: Some("nas".into()),
            wol_enabled: true,
            ..Host::default()
        }];

        let csv = to_csv_string(&hosts).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "IP Address,Hostname,MAC Address,Status,Device Type,WOL Enabled",
                "192.168.1.10,srv,AA:BB:CC:DD:EE:FF,online,nas,Yes",
            ]
        );
    }

    #[test]
    fn absent_fields_are_empty_and_rows_sorted() {
        let hosts = vec![
            Host {
                ip_address: "10.0.0.10".into(),
                ..Host::default()
            },
            Host {
                ip_address: "10.0.0.2".into(),
                status: HostStatus::Offline,
                ..Host::default()
            },
        ];

        let csv = to_csv_string(&hosts).unwrap();
        let lines: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(
            lines,
            vec!["10.0.0.2,,,offline,,No", "10.0.0.10,,,unknown,,No"]
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let hosts = vec![Host {
            ip_address: "10.0.0.1".into(),
            hostname: Some("lab, rack 3".into()),
            ..Host::default()
        }];
        let csv = to_csv_string(&hosts).unwrap();
        assert!(csv.contains("10.0.0.1,\"lab, rack 3\","));
    }

    #[test]
    fn writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_to_dir(&[], dir.path()).unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(EXPORT_FILE_NAME));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.trim_end(), HEADER.join(","));
    }
}
