//! Host details — read-only snapshot with a hand-off to the edit form,
//! plus single-host rediscovery and a WOL capability check.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use wolman_core::Command;
use wolman_core::view::HostDetails;

use crate::action::Action;
use crate::component::Component;
use crate::modals::{centered, overlay_frame};
use crate::theme;

pub struct DetailsModal {
    details: HostDetails,
}

impl DetailsModal {
    pub fn new(details: HostDetails) -> Self {
        Self { details }
    }
}

impl Component for DetailsModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Ok(Some(Action::CloseModal)),
            KeyCode::Char('e') => Ok(Some(Action::OpenForm(Box::new(self.details.edit_form())))),
            KeyCode::Char('r') => Ok(Some(Action::Execute(Command::Rediscover {
                ip: self.details.ip.clone(),
            }))),
            KeyCode::Char('t') => Ok(Some(Action::Execute(Command::TestWol {
                ip: self.details.ip.clone(),
            }))),
            _ => Ok(None),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let height = u16::try_from(self.details.fields.len())
            .unwrap_or(u16::MAX)
            .saturating_add(6);
        let area = centered(area, 64, height);
        let inner = overlay_frame(frame, area, &self.details.title);

        let layout = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let badge = self.details.status;
        let color = Style::default().fg(theme::badge(badge.color()));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  ● ", color),
                Span::styled(badge.label(), color),
            ])),
            layout[0],
        );

        let value_style = Style::default().fg(theme::palette().accent);
        let lines: Vec<Line> = self
            .details
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("  {label:<14}"), theme::text()),
                    Span::styled(value.clone(), value_style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), layout[1]);

        let hints = Line::from(vec![
            Span::styled("  e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("rediscover  ", theme::key_hint()),
            Span::styled("t ", theme::key_hint_key()),
            Span::styled("test WOL  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("close", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use wolman_core::Host;
    use wolman_core::view::FormMode;

    use super::*;

    #[test]
    fn edit_hand_off_prefills_from_snapshot() {
        let host = Host {
            ip_address: "10.0.0.7".into(),
            hostname: Some("printer".into()),
            ..Host::default()
        };
        let mut modal = DetailsModal::new(HostDetails::from_host(&host));

        let action = modal
            .handle_key_event(KeyEvent::from(KeyCode::Char('e')))
            .unwrap();
        match action {
            Some(Action::OpenForm(form)) => {
                assert_eq!(
                    form.mode,
                    FormMode::Edit {
                        ip: "10.0.0.7".into()
                    }
                );
                assert_eq!(form.get("hostname"), "printer");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rescan_and_wol_check_target_this_host() {
        let host = Host {
            ip_address: "10.0.0.7".into(),
            ..Host::default()
        };
        let mut modal = DetailsModal::new(HostDetails::from_host(&host));

        let mut run = |c: char| match modal.handle_key_event(KeyEvent::from(KeyCode::Char(c))) {
            Ok(Some(Action::Execute(cmd))) => cmd,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(
            run('r'),
            Command::Rediscover {
                ip: "10.0.0.7".into()
            }
        );
        assert_eq!(
            run('t'),
            Command::TestWol {
                ip: "10.0.0.7".into()
            }
        );
    }

    #[test]
    fn escape_closes() {
        let mut modal = DetailsModal::new(HostDetails::from_host(&Host::default()));
        let action = modal.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::CloseModal)));
    }
}
