//! Discovery screen — scanner status, start/stop control, and the
//! statistics chart pair.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tracing::debug;

use wolman_core::panel::{ChartSet, DiscoveryPanel, PieChart};
use wolman_core::{Command, DiscoveryStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::share_bar::{percent, share_bar};

pub struct StatusScreen {
    focused: bool,
    panel: DiscoveryPanel,
    charts: ChartSet,
    total_hosts: Option<u64>,
}

impl StatusScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            panel: DiscoveryPanel::from(&DiscoveryStatus::default()),
            charts: ChartSet::new(),
            total_hosts: None,
        }
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Discovery ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let indicator = Style::default().fg(theme::badge(self.panel.indicator));
        let field = |label: &'static str| Span::styled(format!("  {label:<14}"), theme::text());
        let value = |v: String| Span::styled(v, Style::default().fg(theme::palette().accent));

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                field("Status"),
                Span::styled("● ", indicator),
                Span::styled(self.panel.label.clone(), indicator),
            ]),
            Line::from(vec![field("Last run"), value(self.panel.last_run.clone())]),
            Line::from(vec![field("Interval"), value(fmt_interval(self.panel.interval))]),
        ];
        if let Some(total) = self.total_hosts {
            lines.push(Line::from(vec![field("Known hosts"), value(total.to_string())]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  s ", theme::key_hint_key()),
            Span::styled(format!("{}    ", self.panel.toggle.label()), theme::key_hint()),
            Span::styled("f ", theme::key_hint_key()),
            Span::styled("Run scan now", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_chart(frame: &mut Frame, area: Rect, chart: Option<&PieChart>) {
        let title = chart.map_or("", |c| c.title);
        let block = Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(chart) = chart else {
            return;
        };

        let lines = chart_lines(chart, inner.width);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn fmt_interval(interval: Duration) -> String {
    humantime::format_duration(interval).to_string()
}

/// One line per slice: label, share bar, count and percentage.
fn chart_lines(chart: &PieChart, width: u16) -> Vec<Line<'static>> {
    if chart.placeholder {
        let gray = Style::default().fg(theme::palette().gray);
        return vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", chart.slices.first().map_or("", |s| s.label.as_str())),
                gray,
            )),
        ];
    }

    let total = chart.total();
    let label_width = chart
        .slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(20);
    let label_cells = u16::try_from(label_width).unwrap_or(20);
    // " label  bar  count pct"
    let bar_width = width.saturating_sub(label_cells + 16);
    let colors = theme::chart_series();

    let mut lines = vec![Line::from("")];
    for (i, slice) in chart.slices.iter().enumerate() {
        let color = colors[i % colors.len()];
        let label: String = slice.label.chars().take(label_width).collect();
        lines.push(Line::from(vec![
            Span::styled(format!(" {label:<label_width$} "), theme::text()),
            Span::styled(share_bar(slice.value, total, bar_width), Style::default().fg(color)),
            Span::styled(
                format!(" {:>5} {:>4}", slice.value, percent(slice.value, total)),
                theme::muted(),
            ),
        ]));
    }
    lines
}

impl Component for StatusScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('s') => Ok(Some(Action::Execute(Command::ToggleDiscovery))),
            KeyCode::Char('f') => Ok(Some(Action::Execute(Command::ForceScan))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StatusUpdated(status) => {
                self.panel = DiscoveryPanel::from(status);
            }
            Action::StatisticsUpdated(stats) => {
                self.charts.rebuild(stats);
                self.total_hosts = stats.total_hosts;
                debug!(generation = self.charts.generation(), "charts rebuilt");
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Length(10), Constraint::Min(6)]).split(area);
        self.render_panel(frame, layout[0]);

        let charts =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(layout[1]);
        Self::render_chart(frame, charts[0], self.charts.by_method());
        Self::render_chart(frame, charts[1], self.charts.by_status());
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use wolman_core::panel::DiscoveryToggle;
    use wolman_core::{DiscoveryState, Statistics};

    use super::*;

    #[test]
    fn toggle_follows_status() {
        let mut screen = StatusScreen::new();
        assert_eq!(screen.panel.toggle, DiscoveryToggle::Start);

        let running = DiscoveryStatus {
            state: DiscoveryState::Running,
            ..DiscoveryStatus::default()
        };
        screen.update(&Action::StatusUpdated(running)).unwrap();
        assert_eq!(screen.panel.toggle, DiscoveryToggle::Stop);
        assert_eq!(screen.panel.toggle.label(), "Stop Discovery");
    }

    #[test]
    fn every_statistics_update_rebuilds_both_charts() {
        let mut screen = StatusScreen::new();
        assert!(screen.charts.by_status().is_none());

        let stats = Statistics {
            by_status: BTreeMap::from([("online".to_string(), 3), ("offline".to_string(), 1)]),
            ..Statistics::default()
        };
        screen
            .update(&Action::StatisticsUpdated(stats.clone()))
            .unwrap();
        screen.update(&Action::StatisticsUpdated(stats)).unwrap();

        assert_eq!(screen.charts.generation(), 2);
        assert!(screen.charts.by_method().unwrap().placeholder);
        let status = screen.charts.by_status().unwrap();
        assert_eq!(status.slices[0].label, "online");
        assert_eq!(status.total(), 4);
    }

    #[test]
    fn placeholder_chart_renders_no_data_line() {
        let chart = PieChart::build("Host Status", &BTreeMap::new());
        let lines = chart_lines(&chart, 40);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("No Data"));
    }

    #[test]
    fn interval_is_human_readable() {
        assert_eq!(fmt_interval(Duration::from_secs(300)), "5m");
    }
}
