//! Data bridge — connects [`Dashboard`] channels to TUI actions.
//!
//! Starts the dashboard (initial load + poll task), pushes the first
//! snapshots, then forwards every host/status/statistics change and every
//! notification as an [`Action`] until cancelled.

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wolman_core::Dashboard;

use crate::action::Action;

pub async fn spawn_data_bridge(
    dashboard: Dashboard,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    // Subscribe before the first load so no notification is missed.
    let mut hosts = dashboard.hosts();
    let mut status = dashboard.discovery_status();
    let mut statistics = dashboard.statistics();
    let mut notifications = dashboard.notifications();

    // Quitting during a slow first load must not wait for it.
    tokio::select! {
        biased;
        () = cancel.cancelled() => {
            dashboard.shutdown().await;
            info!("data bridge cancelled during initial load");
            return;
        }
        () = dashboard.start() => {}
    }
    info!("data bridge started");

    let _ = action_tx.send(Action::HostsUpdated(hosts.borrow_and_update().clone()));
    let _ = action_tx.send(Action::StatusUpdated(status.borrow_and_update().clone()));
    let _ = action_tx.send(Action::StatisticsUpdated(
        statistics.borrow_and_update().clone(),
    ));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = hosts.changed() => {
                let snapshot = hosts.borrow_and_update().clone();
                debug!(count = snapshot.len(), "dispatching HostsUpdated");
                let _ = action_tx.send(Action::HostsUpdated(snapshot));
            }
            Ok(()) = status.changed() => {
                let s = status.borrow_and_update().clone();
                let _ = action_tx.send(Action::StatusUpdated(s));
            }
            Ok(()) = statistics.changed() => {
                let s = statistics.borrow_and_update().clone();
                let _ = action_tx.send(Action::StatisticsUpdated(s));
            }
            result = notifications.recv() => match result {
                Ok(n) => {
                    let _ = action_tx.send(Action::Notify(n));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notification receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    dashboard.shutdown().await;
    info!("data bridge stopped");
}
