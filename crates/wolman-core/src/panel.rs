// ── Status & statistics panel ──
//
// Discovery status indicator + start/stop toggle, and the two aggregate
// charts. Charts are owned resources: every update drops the previous pair
// before building the next, so no slice outlives the data it came from.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::command::Command;
use crate::model::{DiscoveryState, DiscoveryStatus, Statistics};
use crate::view::BadgeColor;

// ── Discovery status ────────────────────────────────────────────────

/// What the discovery control will do when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryToggle {
    Start,
    Stop,
}

impl DiscoveryToggle {
    /// Decided from the canonical state: only a running process is stopped.
    pub fn for_state(state: DiscoveryState) -> Self {
        match state {
            DiscoveryState::Running => Self::Stop,
            DiscoveryState::Stopped | DiscoveryState::Error | DiscoveryState::Unknown => {
                Self::Start
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start Discovery",
            Self::Stop => "Stop Discovery",
        }
    }

    pub fn command(self) -> Command {
        match self {
            Self::Start => Command::StartDiscovery,
            Self::Stop => Command::StopDiscovery,
        }
    }
}

/// Rendered discovery status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryPanel {
    pub state: DiscoveryState,
    pub label: String,
    pub indicator: BadgeColor,
    pub toggle: DiscoveryToggle,
    pub last_run: String,
    pub interval: Duration,
}

impl From<&DiscoveryStatus> for DiscoveryPanel {
    fn from(status: &DiscoveryStatus) -> Self {
        let label = match (&status.state, &status.error_message) {
            (DiscoveryState::Error, Some(msg)) => format!("Error: {msg}"),
            (state, _) => state.to_string(),
        };
        let indicator = if status.state == DiscoveryState::Running {
            BadgeColor::Green
        } else {
            BadgeColor::Red
        };

        Self {
            state: status.state,
            label,
            indicator,
            toggle: DiscoveryToggle::for_state(status.state),
            last_run: status.last_run.map_or_else(
                || "Never".to_string(),
                |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
            interval: Duration::from_secs(status.interval),
        }
    }
}

// ── Charts ──────────────────────────────────────────────────────────

pub const NO_DATA: &str = "No Data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    pub label: String,
    pub value: u64,
}

/// One chart's slices, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieChart {
    pub title: &'static str,
    pub slices: Vec<Slice>,
    /// Set when the input was empty and the single slice is `No Data`.
    pub placeholder: bool,
}

impl PieChart {
    pub fn build(title: &'static str, counts: &BTreeMap<String, u64>) -> Self {
        let mut slices: Vec<Slice> = counts
            .iter()
            .filter(|(_, v)| **v > 0)
            .map(|(label, value)| Slice {
                label: label.clone(),
                value: *value,
            })
            .collect();
        slices.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));

        if slices.is_empty() {
            return Self {
                title,
                slices: vec![Slice {
                    label: NO_DATA.into(),
                    value: 1,
                }],
                placeholder: true,
            };
        }

        Self {
            title,
            slices,
            placeholder: false,
        }
    }

    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// The "by discovery method" and "by status" chart pair.
#[derive(Debug, Default)]
pub struct ChartSet {
    by_method: Option<PieChart>,
    by_status: Option<PieChart>,
    generation: u64,
}

impl ChartSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release both charts, then build fresh ones from `stats`.
    pub fn rebuild(&mut self, stats: &Statistics) {
        self.destroy();
        self.by_method = Some(PieChart::build("Discovery Methods", &stats.by_discovery_method));
        self.by_status = Some(PieChart::build("Host Status", &stats.by_status));
        self.generation += 1;
    }

    pub fn destroy(&mut self) {
        drop(self.by_method.take());
        drop(self.by_status.take());
    }

    pub fn by_method(&self) -> Option<&PieChart> {
        self.by_method.as_ref()
    }

    pub fn by_status(&self) -> Option<&PieChart> {
        self.by_status.as_ref()
    }

    /// Number of rebuilds so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(state: DiscoveryState) -> DiscoveryStatus {
        DiscoveryStatus {
            state,
            ..DiscoveryStatus::default()
        }
    }

    #[test]
    fn running_offers_stop() {
        let panel = DiscoveryPanel::from(&status(DiscoveryState::Running));
        assert_eq!(panel.indicator, BadgeColor::Green);
        assert_eq!(panel.toggle.label(), "Stop Discovery");
        assert_eq!(panel.toggle.command(), Command::StopDiscovery);
    }

    #[test]
    fn everything_else_offers_start() {
        for state in [
            DiscoveryState::Stopped,
            DiscoveryState::Error,
            DiscoveryState::Unknown,
        ] {
            let panel = DiscoveryPanel::from(&status(state));
            assert_eq!(panel.indicator, BadgeColor::Red);
            assert_eq!(panel.toggle, DiscoveryToggle::Start);
        }
    }

    #[test]
    fn error_message_is_shown() {
        let panel = DiscoveryPanel::from(&DiscoveryStatus {
            state: DiscoveryState::Error,
            error_message: Some("timeout".into()),
            ..DiscoveryStatus::default()
        });
        assert_eq!(panel.label, "Error: timeout");
        assert_eq!(panel.last_run, "Never");
        assert_eq!(panel.interval, Duration::from_secs(300));
    }

    #[test]
    fn empty_mapping_is_single_no_data_slice() {
        let chart = PieChart::build("Host Status", &BTreeMap::new());
        assert!(chart.placeholder);
        assert_eq!(chart.slices.len(), 1);
        assert_eq!(chart.slices[0].label, NO_DATA);
    }

    #[test]
    fn slices_largest_first() {
        let counts = BTreeMap::from([
            ("arp".to_string(), 2),
            ("mdns".to_string(), 5),
            ("snmp".to_string(), 0),
        ]);
        let chart = PieChart::build("Discovery Methods", &counts);
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["mdns", "arp"]);
        assert_eq!(chart.total(), 7);
    }

    #[test]
    fn rebuild_replaces_both_charts() {
        let mut charts = ChartSet::new();
        assert!(charts.by_status().is_none());

        charts.rebuild(&Statistics {
            by_status: BTreeMap::from([("online".to_string(), 3)]),
            ..Statistics::default()
        });
        assert_eq!(charts.generation(), 1);
        assert!(!charts.by_status().is_some_and(|c| c.placeholder));

        charts.rebuild(&Statistics::default());
        assert_eq!(charts.generation(), 2);
        assert!(charts.by_status().is_some_and(|c| c.placeholder));
        assert!(charts.by_method().is_some_and(|c| c.placeholder));
    }
}
