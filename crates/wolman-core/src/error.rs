// ── Core error types ──
//
// User-facing errors from wolman-core. The `From<wolman_api::Error>` impl
// translates transport-layer failures into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Host not found: {ip}")]
    HostNotFound { ip: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by backend: {message}")]
    Rejected { message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// FastAPI `detail` string, when the backend sent one.
        detail: Option<String>,
        status: Option<u16>,
    },

    // ── Export errors ────────────────────────────────────────────────
    #[error("Export failed: {0}")]
    Export(String),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The backend's own explanation, preferred over generic wording in notifications.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            Self::Rejected { message } | Self::ValidationFailed { message } => Some(message),
            _ => None,
        }
    }
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::Export(err.to_string())
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Export(err.to_string())
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wolman_api::Error> for CoreError {
    fn from(err: wolman_api::Error) -> Self {
        match err {
            wolman_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        detail: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            wolman_api::Error::Api { status, detail } => CoreError::Api {
                message: format!(
                    "HTTP {status}: {}",
                    detail.as_deref().unwrap_or("request failed")
                ),
                detail,
                status: Some(status),
            },
            wolman_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            wolman_api::Error::Tls(message) => CoreError::Config { message },
            wolman_api::Error::Deserialization { message, .. } => {
                CoreError::Internal(format!("unexpected response: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_detail_survives_translation() {
        let err: CoreError = wolman_api::Error::Api {
            status: 409,
            detail: Some("Host already exists".into()),
        }
        .into();

        assert_eq!(err.detail(), Some("Host already exists"));
        assert_eq!(err.to_string(), "API error: HTTP 409: Host already exists");
    }

    #[test]
    fn bad_body_becomes_internal() {
        let err: CoreError = wolman_api::Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        }
        .into();

        assert!(matches!(err, CoreError::Internal(_)));
        assert_eq!(err.detail(), None);
    }
}
