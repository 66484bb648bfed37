// ── Dashboard configuration ──
//
// Runtime settings handed to `Dashboard::new`. Built by `wolman-config`
// from the TOML file and CLI overrides.

use std::time::Duration;

use url::Url;

/// How to verify the backend's TLS certificate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    #[default]
    SystemDefaults,
    /// Accept any certificate (self-signed reverse proxy on the LAN).
    DangerAcceptInvalid,
}

/// Settings for one dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend root, e.g. `http://localhost:8000`.
    pub url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Host + discovery-status refresh period. Must be non-zero.
    pub poll_interval: Duration,
}

impl DashboardConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

    /// Config with default timeout and poll interval for the given backend.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }
}
