//! Async client for the WOLManager backend REST API.
//!
//! [`WolClient`] wraps `reqwest` with `/api/v1` URL construction and
//! FastAPI-style error unwrapping (`{"detail": "..."}`). Endpoint groups
//! live in their own modules as inherent methods:
//!
//! - [`hosts`] — host inventory CRUD and WOL registration
//! - [`discovery`] — discovery process control, status, statistics, and wake

pub mod client;
pub mod discovery;
pub mod error;
pub mod hosts;
pub mod models;
pub mod transport;

pub use client::WolClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
