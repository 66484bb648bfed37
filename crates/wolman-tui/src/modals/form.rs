//! Add / edit host form.
//!
//! Text fields are `tui-input` buffers over the shared [`HostForm`] model;
//! the WOL checkbox is the last stop in the tab order. The dialog stays
//! open until the backend accepts the submission.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_input::{Input, InputRequest};

use wolman_core::view::{FormMode, HostForm};

use crate::action::Action;
use crate::component::Component;
use crate::modals::{centered, overlay_frame};
use crate::theme;

const LABEL_WIDTH: u16 = 16;

pub struct FormModal {
    form: HostForm,
    inputs: Vec<Input>,
    /// Index into the text fields; `inputs.len()` is the checkbox.
    active: usize,
    error: Option<String>,
    submitting: bool,
}

impl FormModal {
    pub fn new(form: HostForm) -> Self {
        let inputs = HostForm::FIELDS
            .iter()
            .map(|f| Input::new(form.get(f.key).to_string()))
            .collect();
        let mut modal = Self {
            form,
            inputs,
            active: 0,
            error: None,
            submitting: false,
        };
        if !modal.is_editable(0) {
            modal.focus_next();
        }
        modal
    }

    fn title(&self) -> String {
        match &self.form.mode {
            FormMode::Add => "Add Host".into(),
            FormMode::Edit { ip } => format!("Edit {ip}"),
        }
    }

    fn checkbox_index(&self) -> usize {
        self.inputs.len()
    }

    fn is_editable(&self, idx: usize) -> bool {
        HostForm::FIELDS
            .get(idx)
            .is_none_or(|f| self.form.is_editable(f.key))
    }

    fn focus_next(&mut self) {
        let stops = self.checkbox_index() + 1;
        for _ in 0..stops {
            self.active = (self.active + 1) % stops;
            if self.is_editable(self.active) {
                break;
            }
        }
    }

    fn focus_prev(&mut self) {
        let stops = self.checkbox_index() + 1;
        for _ in 0..stops {
            self.active = (self.active + stops - 1) % stops;
            if self.is_editable(self.active) {
                break;
            }
        }
    }

    /// Copy the input buffers back into the form model.
    fn sync(&mut self) {
        for (field, input) in HostForm::FIELDS.iter().zip(&self.inputs) {
            self.form.set(field.key, input.value());
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        self.sync();
        if let Err(msg) = self.form.validate() {
            self.error = Some(msg);
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some(Action::SubmitForm(Box::new(self.form.clone())))
    }

    fn edit_active(&mut self, key: KeyEvent) {
        let request = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputRequest::DeleteLine
            }
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };
        if let Some(input) = self.inputs.get_mut(self.active) {
            input.handle(request);
        }
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, idx: usize) {
        let (Some(field), Some(input)) = (HostForm::FIELDS.get(idx), self.inputs.get(idx)) else {
            return;
        };
        let active = idx == self.active;
        let editable = self.is_editable(idx);

        let label_style = if active {
            theme::tab_active()
        } else {
            theme::text()
        };
        let value_style = if editable {
            Style::default().fg(theme::palette().accent)
        } else {
            theme::muted()
        };

        let value_width = usize::from(area.width.saturating_sub(LABEL_WIDTH + 2));
        let scroll = input.visual_scroll(value_width);
        let visible: String = input.value().chars().skip(scroll).take(value_width).collect();

        let mut spans = vec![
            Span::styled(
                format!("  {:<width$}", field.label, width = usize::from(LABEL_WIDTH - 2)),
                label_style,
            ),
            Span::styled(visible, value_style),
        ];
        if !editable {
            spans.push(Span::styled("  (locked)", theme::muted()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if active {
            let offset = input.visual_cursor().saturating_sub(scroll);
            let x = area.x + LABEL_WIDTH + u16::try_from(offset).unwrap_or(0);
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}

impl Component for FormModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(Action::CloseModal)),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => return Ok(self.submit()),
            KeyCode::Char(' ') if self.active == self.checkbox_index() => {
                self.form.toggle_wol();
            }
            _ if self.active < self.checkbox_index() => self.edit_active(key),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::FormResult(outcome) = action {
            self.submitting = false;
            if outcome.is_error() {
                self.error = Some(outcome.message.clone());
            } else {
                return Ok(Some(Action::CloseModal));
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = u16::try_from(self.inputs.len()).unwrap_or(u16::MAX);
        let area = centered(area, 70, rows.saturating_add(8));
        let inner = overlay_frame(frame, area, &self.title());

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(self.inputs.iter().map(|_| Constraint::Length(1)));
        constraints.extend([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ]);
        let layout = Layout::vertical(constraints).split(inner);

        for idx in 0..self.inputs.len() {
            if let Some(row) = layout.get(idx + 1) {
                self.render_field(frame, *row, idx);
            }
        }

        let checkbox_row = self.inputs.len() + 2;
        if let Some(row) = layout.get(checkbox_row) {
            let mark = if self.form.wol_checked() { "[x]" } else { "[ ]" };
            let style = if self.active == self.checkbox_index() {
                theme::tab_active()
            } else {
                theme::text()
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {mark} Register for Wake-on-LAN"), style)),
                *row,
            );
        }

        if let Some(row) = layout.get(checkbox_row + 1) {
            let line = if self.submitting {
                Line::from(Span::styled("  Saving…", theme::muted()))
            } else if let Some(err) = &self.error {
                Line::from(Span::styled(
                    format!("  {err}"),
                    Style::default().fg(theme::palette().red),
                ))
            } else {
                Line::from("")
            };
            frame.render_widget(Paragraph::new(line), *row);
        }

        if let Some(row) = layout.last() {
            let hints = Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("Space ", theme::key_hint_key()),
                Span::styled("toggle  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(hints), *row);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use wolman_core::{Host, Notification};

    use super::*;

    fn type_text(modal: &mut FormModal, text: &str) {
        for c in text.chars() {
            modal
                .handle_key_event(KeyEvent::from(KeyCode::Char(c)))
                .unwrap();
        }
    }

    fn press(modal: &mut FormModal, code: KeyCode) -> Option<Action> {
        modal.handle_key_event(KeyEvent::from(code)).unwrap()
    }

    #[test]
    fn add_requires_ip() {
        let mut modal = FormModal::new(HostForm::add());
        assert!(press(&mut modal, KeyCode::Enter).is_none());
        assert_eq!(modal.error.as_deref(), Some("IP address is required"));
    }

    #[test]
    fn add_submits_typed_values_with_checkbox() {
        let mut modal = FormModal::new(HostForm::add());
        type_text(&mut modal, "10.0.0.42");
        press(&mut modal, KeyCode::Tab);
        type_text(&mut modal, "nas");

        // Jump to the checkbox and tick it.
        press(&mut modal, KeyCode::BackTab);
        press(&mut modal, KeyCode::BackTab);
        press(&mut modal, KeyCode::Char(' '));
        assert!(modal.form.wol_checked());

        match press(&mut modal, KeyCode::Enter) {
            Some(Action::SubmitForm(form)) => {
                let host = form.to_new_host();
                assert_eq!(host.ip_address, "10.0.0.42");
                assert_eq!(host.hostname.as_deref(), Some("nas"));
                assert!(host.wol_enabled);
            }
            other => panic!("unexpected {other:?}"),
        }

        // A second Enter while in flight is ignored.
        assert!(press(&mut modal, KeyCode::Enter).is_none());
    }

    #[test]
    fn edit_skips_locked_ip_field() {
        let host = Host {
            ip_address: "10.0.0.7".into(),
            hostname: Some("printer".into()),
            ..Host::default()
        };
        let mut modal = FormModal::new(HostForm::edit(&host));
        assert_eq!(modal.active, 1);

        press(&mut modal, KeyCode::End);
        type_text(&mut modal, "-2");

        match press(&mut modal, KeyCode::Enter) {
            Some(Action::SubmitForm(form)) => {
                let edit = form.to_edit();
                assert_eq!(edit.hostname.as_deref(), Some("printer-2"));
                assert_eq!(edit.mac_address, None);
                assert_eq!(form.get("ip_address"), "10.0.0.7");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn stays_open_on_failure_and_closes_on_success() {
        let mut modal = FormModal::new(HostForm::add());
        type_text(&mut modal, "10.0.0.42");
        press(&mut modal, KeyCode::Enter);

        let next = modal
            .update(&Action::FormResult(Notification::error("Host already exists")))
            .unwrap();
        assert!(next.is_none());
        assert_eq!(modal.error.as_deref(), Some("Host already exists"));

        press(&mut modal, KeyCode::Enter);
        let next = modal
            .update(&Action::FormResult(Notification::success("Host 10.0.0.42 added")))
            .unwrap();
        assert!(matches!(next, Some(Action::CloseModal)));
    }
}
