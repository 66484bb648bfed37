//! WOL roster — the backend's list of WOL-registered hosts, with inline
//! wake and unregister.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use wolman_core::Command;
use wolman_core::view::{RosterRow, RowAction, WolRoster};

use crate::action::Action;
use crate::component::Component;
use crate::modals::{centered, overlay_frame};
use crate::screens::hosts::{dash, header_row, status_cell};
use crate::theme;

pub struct RosterModal {
    roster: WolRoster,
    state: TableState,
}

impl RosterModal {
    pub fn new(roster: WolRoster) -> Self {
        let mut state = TableState::default();
        if !roster.rows.is_empty() {
            state.select(Some(0));
        }
        Self { roster, state }
    }

    fn selected(&self) -> Option<&RosterRow> {
        self.state.selected().and_then(|i| self.roster.rows.get(i))
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.roster.rows.len();
        if len == 0 {
            return;
        }
        let next = self
            .state
            .selected()
            .unwrap_or(0)
            .saturating_add_signed(delta)
            .min(len - 1);
        self.state.select(Some(next));
    }

    fn title(&self) -> String {
        match self.roster.total_hosts {
            Some(total) => format!("WOL Registered ({} of {total})", self.roster.count()),
            None => format!("WOL Registered ({})", self.roster.count()),
        }
    }
}

impl Component for RosterModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('w') => self
                .selected()
                .filter(|row| row.actions.contains(&RowAction::Wake))
                .map(|row| Action::Execute(Command::Wake { ip: row.ip.clone() })),
            KeyCode::Char('u') => self.selected().map(|row| {
                Action::Execute(Command::ToggleWol {
                    ip: row.ip.clone(),
                    enabled: true,
                })
            }),
            _ => None,
        };
        Ok(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let height = u16::try_from(self.roster.rows.len())
            .unwrap_or(u16::MAX)
            .saturating_add(6)
            .max(9);
        let area = centered(area, 80, height);
        let inner = overlay_frame(frame, area, &self.title());

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        if self.roster.rows.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No WOL-registered hosts", theme::muted()))
                    .alignment(Alignment::Center),
                layout[0],
            );
        } else {
            let header = header_row(&["Status", "IP Address", "Hostname", "MAC Address"]);
            let rows: Vec<Row> = self
                .roster
                .rows
                .iter()
                .map(|row| {
                    Row::new(vec![
                        status_cell(row.status),
                        Cell::from(row.ip.clone()),
                        Cell::from(dash(row.hostname.as_deref())),
                        Cell::from(dash(row.mac.as_deref())),
                    ])
                    .style(theme::table_row())
                })
                .collect();
            let widths = [
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Fill(1),
                Constraint::Length(18),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected());
            let mut state = self.state;
            frame.render_stateful_widget(table, layout[0], &mut state);
        }

        let hints = Line::from(vec![
            Span::styled("  w ", theme::key_hint_key()),
            Span::styled("wake  ", theme::key_hint()),
            Span::styled("u ", theme::key_hint_key()),
            Span::styled("unregister  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("close", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use wolman_core::Host;

    use super::*;

    fn host(ip: &str, mac: Option<&str>) -> Host {
        Host {
            ip_address: ip.into(),
            mac_address: mac.map(Into::into),
            wol_enabled: true,
            ..Host::default()
        }
    }

    #[test]
    fn wake_needs_mac() {
        let roster = WolRoster::new(
            vec![host("10.0.0.9", None), host("10.0.0.10", Some("aa:bb:cc:dd:ee:ff"))],
            Some(5),
        );
        let mut modal = RosterModal::new(roster);
        assert_eq!(modal.title(), "WOL Registered (2 of 5)");

        // Sorted: 10.0.0.9 first, which has no MAC.
        let none = modal
            .handle_key_event(KeyEvent::from(KeyCode::Char('w')))
            .unwrap();
        assert!(none.is_none());

        modal
            .handle_key_event(KeyEvent::from(KeyCode::Down))
            .unwrap();
        match modal
            .handle_key_event(KeyEvent::from(KeyCode::Char('w')))
            .unwrap()
        {
            Some(Action::Execute(cmd)) => assert_eq!(
                cmd,
                Command::Wake {
                    ip: "10.0.0.10".into()
                }
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unregister_selected() {
        let mut modal = RosterModal::new(WolRoster::new(vec![host("10.0.0.1", None)], None));
        match modal
            .handle_key_event(KeyEvent::from(KeyCode::Char('u')))
            .unwrap()
        {
            Some(Action::Execute(cmd)) => assert_eq!(
                cmd,
                Command::ToggleWol {
                    ip: "10.0.0.1".into(),
                    enabled: true
                }
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_roster_has_no_selection() {
        let mut modal = RosterModal::new(WolRoster::default());
        assert!(modal.selected().is_none());
        let action = modal
            .handle_key_event(KeyEvent::from(KeyCode::Char('u')))
            .unwrap();
        assert!(action.is_none());
    }
}
