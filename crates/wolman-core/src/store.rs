// ── Host collection store ──
//
// The single source of truth for every view. The backing collection is
// swapped wholesale on each fetch; readers hold an `Arc` snapshot and never
// observe a partial update.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::Host;

/// Reactive holder of the last-fetched host collection.
pub struct HostStore {
    hosts: watch::Sender<Arc<Vec<Host>>>,
    /// Bumped on every replace.
    version: watch::Sender<u64>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl HostStore {
    pub fn new() -> Self {
        let (hosts, _) = watch::channel(Arc::new(Vec::new()));
        let (version, _) = watch::channel(0u64);
        let (last_refresh, _) = watch::channel(None);

        Self {
            hosts,
            version,
            last_refresh,
        }
    }

    /// Swap in a new collection. Server order is kept as-is.
    pub fn replace(&self, hosts: Vec<Host>) {
        self.hosts.send_replace(Arc::new(hosts));
        self.last_refresh.send_replace(Some(Utc::now()));
        self.version.send_modify(|v| *v += 1);
    }

    /// Current snapshot (cheap `Arc` clone).
    pub fn get(&self) -> Arc<Vec<Host>> {
        self.hosts.borrow().clone()
    }

    /// Linear lookup by IP.
    pub fn find_by_ip(&self, ip: &str) -> Option<Host> {
        self.hosts
            .borrow()
            .iter()
            .find(|h| h.ip_address == ip)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.hosts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.borrow().is_empty()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Host>>> {
        self.hosts.subscribe()
    }
}

impl Default for HostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn host(ip: &str) -> Host {
        Host {
            ip_address: ip.into(),
            ..Host::default()
        }
    }

    #[test]
    fn starts_empty() {
        let store = HostStore::new();
        assert!(store.is_empty());
        assert_eq!(store.version(), 0);
        assert_eq!(store.last_refresh(), None);
    }

    #[test]
    fn replace_is_wholesale() {
        let store = HostStore::new();
        store.replace(vec![host("10.0.0.1"), host("10.0.0.2")]);
        let before = store.get();

        store.replace(vec![host("10.0.0.3")]);

        assert_eq!(before.len(), 2, "old snapshot is untouched");
        assert_eq!(store.len(), 1);
        assert_eq!(store.version(), 2);
        assert!(store.find_by_ip("10.0.0.1").is_none());
        assert!(store.find_by_ip("10.0.0.3").is_some());
    }

    #[test]
    fn subscribers_see_replacements() {
        let store = HostStore::new();
        let mut rx = store.subscribe();
        store.replace(vec![host("10.0.0.7")]);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
