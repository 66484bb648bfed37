//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wolman_config::Config;
use wolman_core::notification::NOTIFICATION_TTL;
use wolman_core::view::{FormMode, HostDetails, HostForm};
use wolman_core::{Command, Dashboard, Notification, export};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::modals::details::DetailsModal;
use crate::modals::form::FormModal;
use crate::modals::roster::RosterModal;
use crate::modals::{centered, overlay_frame};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

pub struct App {
    dashboard: Dashboard,
    config: Config,
    /// Explicit config file from the command line, if any.
    config_file: Option<PathBuf>,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Open modal; captures all input while present.
    modal: Option<Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    search_active: bool,
    search_query: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    data_cancel: CancellationToken,
    pending_confirm: Option<ConfirmAction>,
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(dashboard: Dashboard, config: Config, config_file: Option<PathBuf>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            dashboard,
            config,
            config_file,
            active_screen: ScreenId::default(),
            screens: create_screens().into_iter().collect(),
            modal: None,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (width, height) = tui.size().unwrap_or((80, 24));
        debug!(width, height, "terminal size");
        self.init_screens()?;

        let bridge = {
            let dashboard = self.dashboard.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(dashboard, tx, cancel).await;
            })
        };

        let mut events = EventReader::new(Duration::from_millis(250), Duration::from_millis(33));

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(action)?;
                if !self.running {
                    break;
                }
            }

            if matches!(event, Event::Render | Event::Resize(..)) {
                tui.draw(|frame| self.render(frame))?;
            }
        }

        self.data_cancel.cancel();
        events.stop();
        let _ = bridge.await;
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if let Some(modal) = self.modal.as_mut() {
            return modal.handle_key_event(key);
        }

        if self.search_active {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::CloseSearch)),
                KeyCode::Enter => {
                    // Keep the filter, leave input mode.
                    self.search_active = false;
                    Ok(None)
                }
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(Some(Action::SearchInput(self.search_query.clone())))
                }
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            KeyCode::Char('/') => return Ok(Some(Action::OpenSearch)),
            KeyCode::Char('R') => return Ok(Some(Action::Refresh)),
            KeyCode::Char('x') => return Ok(Some(Action::ExportCsv)),
            KeyCode::Char('T') => return Ok(Some(Action::ToggleTheme)),
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok()).unwrap_or(0);
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            KeyCode::BackTab => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            KeyCode::Esc if !self.search_query.is_empty() => {
                return Ok(Some(Action::CloseSearch));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    // ── Dispatch ─────────────────────────────────────────────────

    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
            }

            Action::SwitchScreen(target) => {
                if target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::OpenSearch => {
                self.search_active = true;
                self.action_tx.send(Action::SwitchScreen(ScreenId::Hosts))?;
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.broadcast(&Action::CloseSearch)?;
            }

            // Data updates go to every screen so they stay in sync.
            // Open modals are deliberately left alone.
            Action::HostsUpdated(_)
            | Action::StatusUpdated(_)
            | Action::StatisticsUpdated(_)
            | Action::SearchInput(_) => self.broadcast(&action)?,

            // ── Commands ──────────────────────────────────────────
            Action::Execute(cmd) => {
                if let Some(confirm) = self.confirmation_for(&cmd) {
                    self.pending_confirm = Some(confirm);
                } else {
                    self.spawn_command(cmd);
                }
            }

            Action::Refresh => {
                let dashboard = self.dashboard.clone();
                tokio::spawn(async move { dashboard.refresh_all().await });
            }

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm),

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.spawn_command(confirm.into_command());
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            // ── Modals ────────────────────────────────────────────
            Action::OpenDetails(ip) => match self.dashboard.store().find_by_ip(&ip) {
                Some(host) => {
                    self.open_modal(DetailsModal::new(HostDetails::from_host(&host)));
                }
                None => self.notify(Notification::error(format!("Host {ip} not found"))),
            },

            Action::OpenAddForm => self.open_modal(FormModal::new(HostForm::add())),

            Action::OpenEditForm(ip) => match self.dashboard.store().find_by_ip(&ip) {
                Some(host) => self.open_modal(FormModal::new(HostForm::edit(&host))),
                None => self.notify(Notification::error(format!("Host {ip} not found"))),
            },

            Action::OpenForm(form) => self.open_modal(FormModal::new(*form)),

            Action::SubmitForm(form) => self.spawn_form_submit(&form),

            Action::FormResult(_) => {
                if let Some(modal) = self.modal.as_mut() {
                    if let Some(follow_up) = modal.update(&action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            Action::OpenRoster => {
                let dashboard = self.dashboard.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    // Failures are notified by the dashboard itself.
                    if let Some(roster) = dashboard.fetch_roster().await {
                        let _ = tx.send(Action::RosterLoaded(roster));
                    }
                });
            }

            Action::RosterLoaded(roster) => self.open_modal(RosterModal::new(roster)),

            Action::CloseModal => self.modal = None,

            // ── Misc ──────────────────────────────────────────────
            Action::ExportCsv => self.export_csv(),

            Action::ToggleTheme => self.toggle_theme(),

            Action::Notify(n) => self.notify(n),

            Action::DismissNotification => self.notification = None,
        }

        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some((notification, Instant::now()));
    }

    fn open_modal(&mut self, mut modal: impl Component + 'static) {
        if let Err(e) = modal.init(self.action_tx.clone()) {
            warn!(error = %e, "modal init failed");
            return;
        }
        self.modal = Some(Box::new(modal));
    }

    /// Destructive commands need a yes/no first.
    fn confirmation_for(&self, cmd: &Command) -> Option<ConfirmAction> {
        if !cmd.is_destructive() {
            return None;
        }
        match cmd {
            Command::DeleteHost { ip } => {
                let name = self
                    .dashboard
                    .store()
                    .find_by_ip(ip)
                    .map_or_else(|| ip.clone(), |h| h.display_name().to_string());
                Some(ConfirmAction::DeleteHost {
                    ip: ip.clone(),
                    name,
                })
            }
            _ => None,
        }
    }

    // ── Command execution ────────────────────────────────────────

    /// Run a command in the background. Its notification arrives through
    /// the data bridge.
    fn spawn_command(&self, cmd: Command) {
        let dashboard = self.dashboard.clone();
        tokio::spawn(async move {
            let outcome = dashboard.execute(cmd).await;
            debug!(message = %outcome.message, "command finished");
        });
    }

    fn spawn_form_submit(&self, form: &HostForm) {
        let cmd = match &form.mode {
            FormMode::Add => Command::AddHost(form.to_new_host()),
            FormMode::Edit { ip } => Command::UpdateHost {
                ip: ip.clone(),
                edit: form.to_edit(),
            },
        };
        let dashboard = self.dashboard.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let outcome = dashboard.execute(cmd).await;
            let _ = tx.send(Action::FormResult(outcome));
        });
    }

    fn export_csv(&mut self) {
        let hosts = self.dashboard.hosts_snapshot();
        let dir = self.config.export_dir();
        match export::export_to_dir(&hosts, &dir) {
            Ok(path) => {
                info!(path = %path.display(), count = hosts.len(), "exported hosts");
                self.notify(Notification::success(format!(
                    "Exported {} hosts to {}",
                    hosts.len(),
                    path.display()
                )));
            }
            Err(e) => {
                warn!(error = %e, "CSV export failed");
                self.notify(Notification::error(format!("Export failed: {e}")));
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        theme::apply(self.config.theme);

        let saved = match &self.config_file {
            Some(path) => wolman_config::save_config_to(&self.config, path),
            None => wolman_config::save_config(&self.config),
        };
        if let Err(e) = saved {
            warn!(error = %e, "failed to persist theme");
            self.notify(Notification::warning("Theme changed but could not be saved"));
        }
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(ratatui::widgets::Block::default().style(theme::overlay_bg()), area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, topmost last.
        if let Some(modal) = &self.modal {
            modal.render(frame, area);
        }
        if let Some(confirm) = &self.pending_confirm {
            Self::render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
        if let Some((notif, _)) = &self.notification {
            Self::render_notification(frame, area, notif);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let accent = Style::default().fg(theme::palette().accent);
            let line = Line::from(vec![
                Span::styled(" / ", theme::tab_active()),
                Span::styled(&self.search_query, accent),
                Span::styled("█", accent),
                Span::styled("  Esc clear  Enter keep", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let refreshed = self
            .dashboard
            .store()
            .last_refresh()
            .map_or_else(|| "never".to_string(), |t| t.format("%H:%M:%S").to_string());

        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.dashboard.config().url), theme::text()),
            Span::styled(format!("│ refreshed {refreshed} "), theme::muted()),
            Span::styled(
                "│ ? help  / search  R refresh  x export  T theme  q quit",
                theme::key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let inner = overlay_frame(frame, centered(area, 58, 24), "Keyboard Shortcuts");

        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::palette().accent),
            ))
        };
        let entry = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };

        let lines = vec![
            Line::from(""),
            section("Global"),
            entry("1-2", "Switch screen"),
            entry("/", "Search by IP, hostname or MAC"),
            entry("R", "Refresh now"),
            entry("x", "Export hosts to CSV"),
            entry("T", "Toggle light/dark theme"),
            entry("q", "Quit"),
            Line::from(""),
            section("Hosts"),
            entry("Tab", "Switch table"),
            entry("j/k", "Move selection"),
            entry("Enter", "Host details (r rescan, t test WOL)"),
            entry("w", "Wake"),
            entry("t", "Register / unregister for WOL"),
            entry("e / d", "Edit / delete"),
            entry("a / W", "Add host / WOL roster"),
            Line::from(""),
            section("Discovery"),
            entry("s", "Start / stop discovery"),
            entry("f", "Run a scan now"),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
        let inner = overlay_frame(frame, centered(area, 60, 5), "Confirm");
        let text = vec![
            Line::from(Span::styled(format!("  {confirm}"), theme::text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, 70).min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 1);
        let toast = Rect::new(area.x + x, area.y + y, width, height);

        let (color, icon) = theme::notification(notif.level);

        frame.render_widget(ratatui::widgets::Clear, toast);
        let block = ratatui::widgets::Block::default()
            .borders(ratatui::widgets::Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(theme::overlay_bg());
        let inner = block.inner(toast);
        frame.render_widget(block, toast);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(notif.message.as_str(), theme::text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::sync::broadcast::error::TryRecvError;
    use wolman_core::{DashboardConfig, Host};

    use super::*;

    /// An app wired to a backend that refuses every connection.
    fn offline_app() -> App {
        let config = DashboardConfig::new("http://127.0.0.1:9".parse().unwrap());
        let dashboard = Dashboard::new(config).unwrap();
        dashboard.store().replace(vec![Host {
            ip_address: "10.0.0.5".into(),
            hostname: Some("nas".into()),
            ..Host::default()
        }]);
        App::new(dashboard, Config::default(), None)
    }

    fn delete(ip: &str) -> Action {
        Action::Execute(Command::DeleteHost { ip: ip.into() })
    }

    #[tokio::test]
    async fn delete_waits_for_confirmation() {
        let mut app = offline_app();
        let mut notes = app.dashboard.notifications();

        app.process_action(delete("10.0.0.5")).unwrap();
        assert_eq!(
            app.pending_confirm,
            Some(ConfirmAction::DeleteHost {
                ip: "10.0.0.5".into(),
                name: "nas".into(),
            })
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matches!(notes.try_recv(), Err(TryRecvError::Empty)));

        app.process_action(Action::ConfirmYes).unwrap();
        assert_eq!(app.pending_confirm, None);

        let outcome = tokio::time::timeout(Duration::from_secs(10), notes.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(outcome.is_error());
        assert_eq!(outcome.message, "Failed to delete host");
    }

    #[tokio::test]
    async fn declined_delete_never_runs() {
        let mut app = offline_app();
        let mut notes = app.dashboard.notifications();

        app.process_action(delete("10.0.0.9")).unwrap();
        assert_eq!(
            app.pending_confirm,
            Some(ConfirmAction::DeleteHost {
                ip: "10.0.0.9".into(),
                name: "10.0.0.9".into(),
            })
        );

        app.process_action(Action::ConfirmNo).unwrap();
        assert_eq!(app.pending_confirm, None);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(matches!(notes.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn non_destructive_commands_skip_confirmation() {
        let mut app = offline_app();
        app.process_action(Action::Execute(Command::Wake {
            ip: "10.0.0.5".into(),
        }))
        .unwrap();
        assert_eq!(app.pending_confirm, None);
    }
}
