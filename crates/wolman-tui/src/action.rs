//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use wolman_core::view::{HostForm, WolRoster};
use wolman_core::{Command, DiscoveryStatus, Host, Notification, Statistics};

use crate::screen::ScreenId;

/// Pending confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteHost { ip: String, name: String },
}

impl ConfirmAction {
    pub fn into_command(self) -> Command {
        match self {
            Self::DeleteHost { ip, .. } => Command::DeleteHost { ip },
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteHost { ip, name } if name == ip => {
                write!(f, "Delete host {ip}? This cannot be undone.")
            }
            Self::DeleteHost { ip, name } => {
                write!(f, "Delete {name} ({ip})? This cannot be undone.")
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Data Events (from the Dashboard) ──────────────────────────
    HostsUpdated(Arc<Vec<Host>>),
    StatusUpdated(DiscoveryStatus),
    StatisticsUpdated(Statistics),

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),

    // ── Commands ──────────────────────────────────────────────────
    /// Run a backend command; destructive ones detour through a confirm.
    Execute(Command),
    Refresh,

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Modals ────────────────────────────────────────────────────
    OpenDetails(String),
    OpenAddForm,
    OpenEditForm(String),
    /// Edit hand-off from the details modal, prefilled from its snapshot.
    OpenForm(Box<HostForm>),
    SubmitForm(Box<HostForm>),
    /// Outcome of a submitted form. The form closes only on success.
    FormResult(Notification),
    OpenRoster,
    RosterLoaded(WolRoster),
    CloseModal,

    // ── Misc ──────────────────────────────────────────────────────
    ExportCsv,
    ToggleTheme,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
