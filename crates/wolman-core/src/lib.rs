//! State-reconciliation engine between `wolman-api` and UI consumers.
//!
//! - **[`Dashboard`]** — cheap-clone handle owning the [`HostStore`], the
//!   discovery status/statistics channels, the cancellable poll task, and
//!   command dispatch. Every mutation re-fetches from the backend; nothing
//!   is patched locally.
//!
//! - **[`HostStore`]** — the last-fetched host collection, replaced
//!   wholesale on every fetch and vended to readers as an `Arc` snapshot.
//!
//! - **[`view`]** — pure view model: IP-sorted partition into registered /
//!   unregistered row descriptors, search filtering, counters, and the
//!   modal models (details, host form, WOL roster).
//!
//! - **[`panel`]** — discovery status indicator/toggle and the chart pair.
//!
//! - **[`export`]** — CSV export of the inventory.

pub mod command;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod ip_order;
pub mod model;
pub mod notification;
pub mod panel;
pub mod store;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::Command;
pub use config::{DashboardConfig, TlsVerification};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use model::{
    DiscoveryState, DiscoveryStatus, Host, HostEdit, HostStatus, NewHost, Statistics,
};
pub use notification::{Notification, NotificationLevel};
pub use store::HostStore;
