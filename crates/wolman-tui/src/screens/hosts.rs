//! Hosts screen — WOL-registered and unregistered tables with counters.
//!
//! Everything shown is derived from `wolman_core::view::render_tables`;
//! this module only maps row descriptors onto widgets and keys onto
//! row actions.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use wolman_core::view::{HostTables, RowAction, SearchFilter, StatusBadge, render_tables};
use wolman_core::{Command, Host, Notification};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Registered,
    Unregistered,
}

pub struct HostsScreen {
    focused: bool,
    hosts: Arc<Vec<Host>>,
    filter: SearchFilter,
    tables: HostTables,
    focus: Focus,
    registered_state: TableState,
    unregistered_state: TableState,
}

impl HostsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            hosts: Arc::new(Vec::new()),
            filter: SearchFilter::default(),
            tables: HostTables::default(),
            focus: Focus::default(),
            registered_state: TableState::default(),
            unregistered_state: TableState::default(),
        }
    }

    /// Re-derive both tables from the current snapshot and filter.
    fn recompute(&mut self) {
        self.tables = render_tables(&self.hosts, &self.filter);
        clamp(&mut self.registered_state, self.tables.registered.len());
        clamp(&mut self.unregistered_state, self.tables.unregistered.len());
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Focus::Registered => self.tables.registered.len(),
            Focus::Unregistered => self.tables.unregistered.len(),
        }
    }

    fn focused_state(&mut self) -> &mut TableState {
        match self.focus {
            Focus::Registered => &mut self.registered_state,
            Focus::Unregistered => &mut self.unregistered_state,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.focused_len();
        if len == 0 {
            return;
        }
        let state = self.focused_state();
        let current = state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        state.select(Some(next));
    }

    /// IP and available actions of the selected row in the focused table.
    fn selected_row(&self) -> Option<(&str, &[RowAction])> {
        match self.focus {
            Focus::Registered => {
                let idx = self.registered_state.selected()?;
                let row = self.tables.registered.rows.get(idx)?;
                Some((row.ip.as_str(), row.actions.as_slice()))
            }
            Focus::Unregistered => {
                let idx = self.unregistered_state.selected()?;
                let row = self.tables.unregistered.rows.get(idx)?;
                Some((row.ip.as_str(), row.actions.as_slice()))
            }
        }
    }

    fn table_block(&self, title: String, focus: Focus) -> Block<'static> {
        Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused && self.focus == focus {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    fn placeholder(&self, empty_text: &str) -> Paragraph<'static> {
        let text = if self.tables.filtered {
            format!("No hosts match \"{}\"", self.filter.term())
        } else {
            empty_text.to_string()
        };
        Paragraph::new(Line::from(Span::styled(text, theme::muted()))).alignment(Alignment::Center)
    }

    fn render_counters(&self, frame: &mut Frame, area: Rect) {
        let c = self.tables.counters;
        let p = theme::palette();
        let value = |n: usize| Span::styled(n.to_string(), Style::default().fg(p.accent));

        let mut spans = vec![
            Span::styled(" Registered ", theme::text()),
            value(c.registered),
            Span::styled("  WOL enabled ", theme::text()),
            value(c.wol_enabled),
            Span::styled("  Total ", theme::text()),
            value(c.total),
            Span::styled("  Online ", theme::text()),
            Span::styled(c.online.to_string(), Style::default().fg(p.green)),
        ];
        if self.tables.filtered {
            spans.push(Span::styled(
                format!("   filter: \"{}\"", self.filter.term()),
                Style::default().fg(p.yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_registered(&self, frame: &mut Frame, area: Rect) {
        let view = &self.tables.registered;
        let block = self.table_block(format!(" WOL Registered ({}) ", view.len()), Focus::Registered);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if view.show_placeholder() {
            frame.render_widget(self.placeholder("No WOL-registered hosts"), inner);
            return;
        }

        let header = header_row(&["Status", "IP Address", "Hostname", "MAC Address", "Actions"]);
        let rows: Vec<Row> = view
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    status_cell(row.status),
                    Cell::from(row.ip.clone()),
                    Cell::from(dash(row.hostname.as_deref())),
                    Cell::from(dash(row.mac.as_deref())),
                    Cell::from(action_labels(&row.actions)).style(theme::muted()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Fill(2),
            Constraint::Length(18),
            Constraint::Fill(3),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.registered_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn render_unregistered(&self, frame: &mut Frame, area: Rect) {
        let view = &self.tables.unregistered;
        let block = self.table_block(format!(" Other Hosts ({}) ", view.len()), Focus::Unregistered);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if view.show_placeholder() {
            frame.render_widget(self.placeholder("No unregistered hosts"), inner);
            return;
        }

        let header = header_row(&["Status", "IP Address", "Hostname", "MAC Address", "Vendor", "Device"]);
        let rows: Vec<Row> = view
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    status_cell(row.status),
                    Cell::from(row.ip.clone()),
                    Cell::from(dash(row.hostname.as_deref())),
                    Cell::from(dash(row.mac.as_deref())),
                    Cell::from(dash(row.vendor.as_deref())),
                    Cell::from(row.device.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Fill(2),
            Constraint::Length(18),
            Constraint::Fill(2),
            Constraint::Fill(3),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());
        let mut state = self.unregistered_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(" ")];
        if let Some((_, actions)) = self.selected_row() {
            for action in actions.iter().filter(|a| a.is_enabled()) {
                spans.push(Span::styled(format!("{} ", action_key(*action)), theme::key_hint_key()));
                spans.push(Span::styled(format!("{}  ", action.label().to_lowercase()), theme::key_hint()));
            }
        }
        for (key, label) in [("a", "add"), ("W", "roster"), ("Tab", "switch table")] {
            spans.push(Span::styled(format!("{key} "), theme::key_hint_key()));
            spans.push(Span::styled(format!("{label}  "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for HostsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                if self.focused_len() > 0 {
                    self.focused_state().select(Some(0));
                }
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.focused_len();
                if len > 0 {
                    self.focused_state().select(Some(len - 1));
                }
                Ok(None)
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Registered => Focus::Unregistered,
                    Focus::Unregistered => Focus::Registered,
                };
                Ok(None)
            }
            KeyCode::Char('a') => Ok(Some(Action::OpenAddForm)),
            KeyCode::Char('W') => Ok(Some(Action::OpenRoster)),
            code => Ok(self.selected_row().and_then(|(ip, actions)| {
                find_action(actions, code).map(|action| row_action(action, ip))
            })),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::HostsUpdated(hosts) => {
                self.hosts = Arc::clone(hosts);
                self.recompute();
            }
            Action::SearchInput(term) => {
                self.filter = SearchFilter::new(term);
                self.recompute();
            }
            Action::CloseSearch => {
                self.filter = SearchFilter::default();
                self.recompute();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_counters(frame, layout[0]);
        self.render_registered(frame, layout[1]);
        self.render_unregistered(frame, layout[2]);
        self.render_hints(frame, layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

// ── Row actions ──────────────────────────────────────────────────────

fn action_key(action: RowAction) -> &'static str {
    match action {
        RowAction::Wake => "w",
        RowAction::Register | RowAction::RegisterDisabled | RowAction::Unregister => "t",
        RowAction::Details => "Enter",
        RowAction::Edit => "e",
        RowAction::Delete => "d",
    }
}

/// The row action bound to `code`, if the row offers it.
fn find_action(actions: &[RowAction], code: KeyCode) -> Option<RowAction> {
    let pressed = match code {
        KeyCode::Enter => "Enter",
        KeyCode::Char('w') => "w",
        KeyCode::Char('t') => "t",
        KeyCode::Char('e') => "e",
        KeyCode::Char('d') => "d",
        _ => return None,
    };
    actions.iter().copied().find(|a| action_key(*a) == pressed)
}

/// Translate a row action on `ip` into the app-level action.
pub fn row_action(action: RowAction, ip: &str) -> Action {
    let ip = ip.to_string();
    match action {
        RowAction::Wake => Action::Execute(Command::Wake { ip }),
        RowAction::Register => Action::Execute(Command::ToggleWol { ip, enabled: false }),
        RowAction::Unregister => Action::Execute(Command::ToggleWol { ip, enabled: true }),
        RowAction::RegisterDisabled => Action::Notify(Notification::warning(format!(
            "{ip} has no MAC address and cannot be registered"
        ))),
        RowAction::Details => Action::OpenDetails(ip),
        RowAction::Edit => Action::OpenEditForm(ip),
        RowAction::Delete => Action::Execute(Command::DeleteHost { ip }),
    }
}

// ── Cell helpers ─────────────────────────────────────────────────────

pub(crate) fn status_cell(badge: StatusBadge) -> Cell<'static> {
    Cell::from(format!("● {}", badge.label()))
        .style(Style::default().fg(theme::badge(badge.color())))
}

pub(crate) fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(
        labels
            .iter()
            .map(|l| Cell::from(*l).style(theme::table_header())),
    )
}

pub(crate) fn dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn action_labels(actions: &[RowAction]) -> String {
    actions
        .iter()
        .filter(|a| a.is_enabled())
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(" · ")
}

fn clamp(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
    } else {
        let idx = state.selected().unwrap_or(0).min(len - 1);
        state.select(Some(idx));
    }
}
