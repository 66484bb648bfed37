// ── IPv4 ordering ──
//
// Numeric, octet-wise ordering for dotted-quad strings. Every host listing
// (both tables, the WOL roster, CSV export) sorts with this.

use std::cmp::Ordering;

/// Split a dotted quad into its four octets. `None` for anything else.
pub fn parse_octets(ip: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = ip.trim().split('.');
    for slot in &mut octets {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(octets)
}

/// Compare two addresses octet by octet.
///
/// Total over all strings: well-formed addresses come first in numeric
/// order, malformed ones follow ordered by raw text.
pub fn compare_ip(a: &str, b: &str) -> Ordering {
    match (parse_octets(a), parse_octets(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Stable sort of any slice by an extracted IP string.
pub fn sort_by_ip<T>(items: &mut [T], ip: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare_ip(ip(a), ip(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_not_lexicographic() {
        let mut ips = vec!["10.0.1.1", "10.0.0.10", "10.0.0.2"];
        sort_by_ip(&mut ips, |s| *s);
        assert_eq!(ips, vec!["10.0.0.2", "10.0.0.10", "10.0.1.1"]);
    }

    #[test]
    fn first_differing_octet_decides() {
        assert_eq!(compare_ip("192.168.2.1", "192.168.10.0"), Ordering::Less);
        assert_eq!(compare_ip("9.255.255.255", "10.0.0.0"), Ordering::Less);
        assert_eq!(compare_ip("10.0.0.1", "10.0.0.1"), Ordering::Equal);
    }

    #[test]
    fn malformed_sorts_last() {
        let mut ips = vec!["not-an-ip", "10.0.0.1", "300.1.1.1", "1.2.3"];
        sort_by_ip(&mut ips, |s| *s);
        assert_eq!(ips, vec!["10.0.0.1", "1.2.3", "300.1.1.1", "not-an-ip"]);
    }

    #[test]
    fn rejects_non_quads() {
        assert_eq!(parse_octets("1.2.3.4.5"), None);
        assert_eq!(parse_octets("1..3.4"), None);
        assert_eq!(parse_octets("+1.2.3.4"), None);
        assert_eq!(parse_octets(" 192.168.0.1 "), Some([192, 168, 0, 1]));
    }
}
