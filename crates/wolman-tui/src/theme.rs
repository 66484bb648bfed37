//! Dark and light palettes plus semantic styles.
//!
//! The active palette lives in an [`ArcSwap`] so a theme toggle takes
//! effect on the next frame without threading state through every widget.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use ratatui::style::{Color, Modifier, Style};

use wolman_config::ThemePreference;
use wolman_core::NotificationLevel;
use wolman_core::view::BadgeColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub highlight: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub bg: Color,
    pub bg_selected: Color,
    pub green: Color,
    pub red: Color,
    pub yellow: Color,
    pub gray: Color,
}

pub const DARK: Palette = Palette {
    accent: Color::Rgb(128, 255, 234),    // #80ffea
    highlight: Color::Rgb(225, 53, 255),  // #e135ff
    text: Color::Rgb(189, 193, 207),      // #bdc1cf
    muted: Color::Rgb(98, 114, 164),      // #6272a4
    border: Color::Rgb(98, 114, 164),     // #6272a4
    bg: Color::Rgb(30, 31, 41),           // #1e1f29
    bg_selected: Color::Rgb(40, 42, 54),  // #282a36
    green: Color::Rgb(80, 250, 123),      // #50fa7b
    red: Color::Rgb(255, 99, 99),         // #ff6363
    yellow: Color::Rgb(241, 250, 140),    // #f1fa8c
    gray: Color::Rgb(139, 143, 160),      // #8b8fa0
};

pub const LIGHT: Palette = Palette {
    accent: Color::Rgb(0, 110, 140),      // #006e8c
    highlight: Color::Rgb(140, 30, 170),  // #8c1eaa
    text: Color::Rgb(40, 42, 54),         // #282a36
    muted: Color::Rgb(110, 115, 130),     // #6e7382
    border: Color::Rgb(150, 155, 170),    // #969baa
    bg: Color::Rgb(248, 248, 242),        // #f8f8f2
    bg_selected: Color::Rgb(225, 228, 235), // #e1e4eb
    green: Color::Rgb(20, 140, 60),       // #148c3c
    red: Color::Rgb(200, 40, 40),         // #c82828
    yellow: Color::Rgb(170, 120, 0),      // #aa7800
    gray: Color::Rgb(120, 120, 120),      // #787878
};

static ACTIVE: LazyLock<ArcSwap<Palette>> = LazyLock::new(|| ArcSwap::from_pointee(DARK));

/// Switch the active palette.
pub fn apply(pref: ThemePreference) {
    let palette = match pref {
        ThemePreference::Dark => DARK,
        ThemePreference::Light => LIGHT,
    };
    ACTIVE.store(Arc::new(palette));
}

pub fn palette() -> Arc<Palette> {
    ACTIVE.load_full()
}

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default()
        .fg(palette().accent)
        .add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(palette().highlight)
}

pub fn border_default() -> Style {
    Style::default().fg(palette().border)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(palette().accent)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(palette().text)
}

pub fn table_selected() -> Style {
    let p = palette();
    Style::default()
        .fg(p.highlight)
        .bg(p.bg_selected)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(palette().highlight)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(palette().text)
}

pub fn text() -> Style {
    Style::default().fg(palette().text)
}

pub fn muted() -> Style {
    Style::default().fg(palette().muted)
}

/// Clears an overlay's area.
pub fn overlay_bg() -> Style {
    Style::default().bg(palette().bg)
}

pub fn key_hint() -> Style {
    Style::default().fg(palette().muted)
}

pub fn key_hint_key() -> Style {
    Style::default()
        .fg(palette().accent)
        .add_modifier(Modifier::BOLD)
}

pub fn badge(color: BadgeColor) -> Color {
    let p = palette();
    match color {
        BadgeColor::Green => p.green,
        BadgeColor::Red => p.red,
        BadgeColor::Gray => p.gray,
    }
}

pub fn notification(level: NotificationLevel) -> (Color, &'static str) {
    let p = palette();
    match level {
        NotificationLevel::Success => (p.green, "✓"),
        NotificationLevel::Error => (p.red, "✗"),
        NotificationLevel::Warning => (p.yellow, "!"),
        NotificationLevel::Info => (p.accent, "·"),
    }
}

/// Bar colors for chart slices, cycled in order.
pub fn chart_series() -> [Color; 5] {
    let p = palette();
    [p.accent, p.highlight, p.green, p.yellow, p.red]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn apply_swaps_palette() {
        apply(ThemePreference::Light);
        assert_eq!(*palette(), LIGHT);
        apply(ThemePreference::Dark);
        assert_eq!(*palette(), DARK);
    }
}
