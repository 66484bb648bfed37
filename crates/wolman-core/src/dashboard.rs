// ── Dashboard ──
//
// Owns one backend connection's worth of client state: the host store,
// discovery status and statistics channels, the notification stream, and
// the cancellable poll task. Commands never patch state locally; each one
// ends with an authoritative re-fetch.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wolman_api::transport::{TlsMode, TransportConfig};
use wolman_api::WolClient;

use crate::command::Command;
use crate::config::{DashboardConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{DiscoveryStatus, Host, Statistics};
use crate::notification::Notification;
use crate::panel::DiscoveryToggle;
use crate::store::HostStore;
use crate::view::WolRoster;

const NOTIFY_CHANNEL_SIZE: usize = 64;

/// Cheaply cloneable handle to the dashboard state.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    client: WolClient,
    store: Arc<HostStore>,
    status: watch::Sender<DiscoveryStatus>,
    statistics: watch::Sender<Statistics>,
    notify_tx: broadcast::Sender<Notification>,
    cancel: CancellationToken,
    /// Child token for the current run; replaced on every `start`.
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Dashboard {
    /// Build a dashboard and its HTTP client. Does not fetch anything yet.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = WolClient::new(config.url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Build around an existing client.
    pub fn with_client(config: DashboardConfig, client: WolClient) -> Self {
        let (status, _) = watch::channel(DiscoveryStatus::default());
        let (statistics, _) = watch::channel(Statistics::default());
        let (notify_tx, _) = broadcast::channel(NOTIFY_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(DashboardInner {
                config,
                client,
                store: Arc::new(HostStore::new()),
                status,
                statistics,
                notify_tx,
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<HostStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Start polling, then run the initial load of hosts, status and
    /// statistics.
    ///
    /// Fetch failures degrade to empty data and a notification; they never
    /// prevent polling from starting. Calling `start` while already running
    /// is a no-op. The task lock is not held across the initial load, so
    /// [`shutdown`](Self::shutdown) can run while it is still in flight.
    pub async fn start(&self) {
        {
            let mut handles = self.inner.task_handles.lock().await;
            if !handles.is_empty() {
                debug!("dashboard already running");
                return;
            }

            let child = self.inner.cancel.child_token();
            *self.inner.cancel_child.lock().await = child.clone();

            let period = self.inner.config.poll_interval;
            if period.is_zero() {
                warn!("poll interval is zero, background refresh disabled");
            } else {
                handles.push(tokio::spawn(poll_task(self.clone(), period, child)));
            }
            info!(url = %self.inner.config.url, ?period, "dashboard started");
        }

        self.refresh_all().await;
    }

    /// Stop polling and wait for the poll task to exit.
    ///
    /// Fetches already in flight are not cancelled and may still land.
    pub async fn shutdown(&self) {
        self.inner.cancel_child.lock().await.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        info!("dashboard stopped");
    }

    /// Cancel every run, including future restarts.
    pub fn cancel_token(&self) -> CancellationToken {
        self.inner.cancel.clone()
    }

    // ── Authoritative fetches ────────────────────────────────────

    /// Fetch `/hosts` and replace the store. Failure empties the store.
    pub async fn load_hosts(&self) -> Arc<Vec<Host>> {
        if self.fetch_hosts().await.is_err() {
            self.notify(Notification::error("Failed to load hosts"));
        }
        self.inner.store.get()
    }

    /// Replace the store from `/hosts` without notifying. Failure empties
    /// the store and is returned to the caller.
    async fn fetch_hosts(&self) -> Result<(), CoreError> {
        match self.inner.client.list_hosts().await {
            Ok(raw) => {
                let hosts: Vec<Host> = raw.into_iter().map(Host::from).collect();
                debug!(count = hosts.len(), "hosts loaded");
                self.inner.store.replace(hosts);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load hosts");
                self.inner.store.replace(Vec::new());
                Err(e.into())
            }
        }
    }

    /// Fetch discovery status. Failure yields the fail-safe default.
    pub async fn load_status(&self) -> DiscoveryStatus {
        let status = match self.inner.client.discovery_status().await {
            Ok(raw) => DiscoveryStatus::from(raw),
            Err(e) => {
                warn!(error = %e, "failed to load discovery status");
                DiscoveryStatus::default()
            }
        };
        self.inner.status.send_replace(status.clone());
        status
    }

    /// Fetch statistics. Failure yields empty mappings.
    pub async fn load_statistics(&self) -> Statistics {
        let stats = match self.inner.client.discovery_statistics().await {
            Ok(raw) => Statistics::from(raw),
            Err(e) => {
                warn!(error = %e, "failed to load discovery statistics");
                Statistics::default()
            }
        };
        self.inner.statistics.send_replace(stats.clone());
        stats
    }

    /// Hosts and discovery status: what every poll tick refreshes.
    pub async fn refresh_hosts_and_status(&self) {
        tokio::join!(self.load_hosts(), self.load_status());
    }

    pub async fn refresh_all(&self) {
        tokio::join!(self.load_hosts(), self.load_status(), self.load_statistics());
    }

    /// Fetch the WOL roster for the roster modal. `None` after a failure,
    /// which has already been notified.
    pub async fn fetch_roster(&self) -> Option<WolRoster> {
        match self.inner.client.list_wol_registered().await {
            Ok(resp) => {
                let hosts = resp.hosts.into_iter().map(Host::from).collect();
                Some(WolRoster::new(hosts, resp.total_hosts))
            }
            Err(e) => {
                warn!(error = %e, "failed to load WOL roster");
                self.notify(Notification::error("Failed to load WOL-registered hosts"));
                None
            }
        }
    }

    // ── Command execution ────────────────────────────────────────

    /// Run one command. Always ends in a notification, which is also
    /// broadcast to [`notifications`](Self::notifications) subscribers.
    pub async fn execute(&self, cmd: Command) -> Notification {
        let cmd = match cmd {
            Command::ToggleDiscovery => {
                let state = self.inner.status.borrow().state;
                DiscoveryToggle::for_state(state).command()
            }
            other => other,
        };

        debug!(command = %cmd, "executing");
        let notification = route_command(self, cmd).await;
        self.notify(notification.clone());
        notification
    }

    fn notify(&self, notification: Notification) {
        // No subscribers is fine: the caller still gets the return value.
        let _ = self.inner.notify_tx.send(notification);
    }

    // ── Subscriptions & snapshots ────────────────────────────────

    pub fn hosts(&self) -> watch::Receiver<Arc<Vec<Host>>> {
        self.inner.store.subscribe()
    }

    pub fn discovery_status(&self) -> watch::Receiver<DiscoveryStatus> {
        self.inner.status.subscribe()
    }

    pub fn statistics(&self) -> watch::Receiver<Statistics> {
        self.inner.statistics.subscribe()
    }

    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notify_tx.subscribe()
    }

    pub fn hosts_snapshot(&self) -> Arc<Vec<Host>> {
        self.inner.store.get()
    }

    pub fn status_snapshot(&self) -> DiscoveryStatus {
        self.inner.status.borrow().clone()
    }

    pub fn statistics_snapshot(&self) -> Statistics {
        self.inner.statistics.borrow().clone()
    }
}

// ── Background tasks ─────────────────────────────────────────────────

/// Refresh hosts + status every `period` until cancelled.
///
/// Each tick's fetch is spawned on its own, so a slow response never holds
/// back the next tick and whichever response lands last wins.
async fn poll_task(dashboard: Dashboard, period: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(period);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                let dash = dashboard.clone();
                tokio::spawn(async move { dash.refresh_hosts_and_status().await });
            }
        }
    }
    debug!("poll task exited");
}

// ── Command routing ──────────────────────────────────────────────────

/// Failure message: the backend's `detail` when it sent one, else generic.
fn failure(action: &str, err: &CoreError) -> Notification {
    warn!(error = %err, "failed to {action}");
    Notification::error(
        err.detail()
            .map_or_else(|| format!("Failed to {action}"), String::from),
    )
}

fn message_or(message: String, fallback: impl FnOnce() -> String) -> String {
    if message.trim().is_empty() {
        fallback()
    } else {
        message
    }
}

/// Re-fetch hosts after a successful command. A failed reload is folded
/// into the command's own notification.
async fn reloaded(dashboard: &Dashboard, outcome: Notification) -> Notification {
    match dashboard.fetch_hosts().await {
        Ok(()) => outcome,
        Err(_) => Notification::warning(format!(
            "{}, but the host list could not be reloaded",
            outcome.message
        )),
    }
}

async fn route_command(dashboard: &Dashboard, cmd: Command) -> Notification {
    let client = &dashboard.inner.client;

    match cmd {
        // ── Wake-on-LAN ──────────────────────────────────────────
        Command::Wake { ip } => match client.wake(&ip).await.map_err(CoreError::from) {
            Ok(resp) if resp.success => {
                let message =
                    message_or(resp.message, || format!("Wake-on-LAN packet sent to {ip}"));
                reloaded(dashboard, Notification::success(message)).await
            }
            Ok(resp) => {
                warn!(%ip, message = %resp.message, "wake rejected");
                Notification::error(message_or(resp.message, || format!("Failed to wake {ip}")))
            }
            Err(e) => failure(&format!("wake {ip}"), &e),
        },

        Command::ToggleWol { ip, enabled } => {
            let (result, verb) = if enabled {
                (client.unregister_wol(&ip).await, "unregister")
            } else {
                (client.register_wol(&ip).await, "register")
            };
            match result.map_err(CoreError::from) {
                Ok(resp) => {
                    let message = message_or(resp.message, || format!("{ip}: WOL {verb}ed"));
                    reloaded(dashboard, Notification::success(message)).await
                }
                Err(e) => failure(&format!("{verb} {ip} for WOL"), &e),
            }
        }

        Command::TestWol { ip } => match client.test_wol(&ip).await.map_err(CoreError::from) {
            Ok(resp) if resp.wol_capable => reloaded(
                dashboard,
                Notification::success(message_or(resp.reason, || format!("{ip} can be woken"))),
            )
            .await,
            Ok(resp) => reloaded(
                dashboard,
                Notification::warning(message_or(resp.reason, || {
                    format!("{ip} cannot be woken")
                })),
            )
            .await,
            Err(e) => failure(&format!("test WOL for {ip}"), &e),
        },

        // ── Host inventory ───────────────────────────────────────
        Command::AddHost(host) => {
            if host.ip_address.is_empty() {
                return Notification::error("IP address is required");
            }
            let ip = host.ip_address.clone();
            match client.create_host(&host.into()).await.map_err(CoreError::from) {
                Ok(_) => {
                    reloaded(dashboard, Notification::success(format!("Host {ip} added"))).await
                }
                Err(e) => failure("add host", &e),
            }
        }

        Command::UpdateHost { ip, edit } => {
            if edit.is_empty() {
                return Notification::info("No changes to save");
            }
            match client
                .update_host(&ip, &edit.into())
                .await
                .map_err(CoreError::from)
            {
                Ok(_) => {
                    reloaded(dashboard, Notification::success(format!("Host {ip} updated"))).await
                }
                Err(e) => failure("update host", &e),
            }
        }

        Command::DeleteHost { ip } => match client.delete_host(&ip).await.map_err(CoreError::from)
        {
            Ok(()) => {
                reloaded(dashboard, Notification::success(format!("Host {ip} deleted"))).await
            }
            Err(e) => failure("delete host", &e),
        },

        // ── Discovery ────────────────────────────────────────────
        Command::StartDiscovery => match client.start_discovery().await.map_err(CoreError::from) {
            Ok(resp) => {
                let outcome =
                    Notification::success(message_or(resp.message, || "Discovery started".into()));
                let (outcome, _) =
                    tokio::join!(reloaded(dashboard, outcome), dashboard.load_status());
                outcome
            }
            Err(e) => failure("start discovery", &e),
        },

        Command::StopDiscovery => match client.stop_discovery().await.map_err(CoreError::from) {
            Ok(resp) => {
                let outcome =
                    Notification::success(message_or(resp.message, || "Discovery stopped".into()));
                let (outcome, _) =
                    tokio::join!(reloaded(dashboard, outcome), dashboard.load_status());
                outcome
            }
            Err(e) => failure("stop discovery", &e),
        },

        Command::ForceScan => match client.run_discovery().await.map_err(CoreError::from) {
            Ok(found) => {
                let outcome = Notification::success(format!(
                    "Discovery completed: {} hosts found",
                    found.len()
                ));
                let (outcome, _) =
                    tokio::join!(reloaded(dashboard, outcome), dashboard.load_statistics());
                outcome
            }
            Err(e) => failure("run discovery", &e),
        },

        Command::Rediscover { ip } => match client.discover_host(&ip).await.map_err(CoreError::from)
        {
            Ok(found) => {
                let status = Host::from(found).status;
                reloaded(
                    dashboard,
                    Notification::success(format!("Rediscovered {ip} ({status})")),
                )
                .await
            }
            Err(e) => failure(&format!("rediscover {ip}"), &e),
        },

        // Resolved in `execute` before routing.
        Command::ToggleDiscovery => Notification::warning("Discovery status unavailable"),
    }
}

fn build_transport(config: &DashboardConfig) -> TransportConfig {
    TransportConfig {
        tls: match config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
