// ── Domain model ──
//
// Canonical host and discovery types consumed by the view layer. Wire
// types from `wolman-api` are converted in `crate::convert`.

pub mod discovery;
pub mod host;

pub use discovery::{DiscoveryState, DiscoveryStatus, Statistics};
pub use host::{Host, HostEdit, HostStatus, NewHost};
