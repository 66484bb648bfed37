//! Proportional bars drawn with eighth-block characters.

const FRACTIONAL: [char; 8] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// A bar `width` cells wide, filled to `value / total`, padded with spaces.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn share_bar(value: u64, total: u64, width: u16) -> String {
    let width_cells = usize::from(width);
    if total == 0 || width == 0 {
        return " ".repeat(width_cells);
    }

    let fraction = (value as f64 / total as f64).min(1.0);
    let eighths = (fraction * f64::from(width) * 8.0).round() as usize;
    let full = eighths / 8;
    let remainder = eighths % 8;

    let mut bar = "█".repeat(full);
    if let Some(partial) = FRACTIONAL.get(remainder).filter(|_| remainder > 0) {
        bar.push(*partial);
    }
    let drawn = full + usize::from(remainder > 0);
    bar.push_str(&" ".repeat(width_cells.saturating_sub(drawn)));
    bar
}

/// Whole-number percentage of `total`.
#[allow(clippy::cast_precision_loss)]
pub fn percent(value: u64, total: u64) -> String {
    if total == 0 {
        return "0%".into();
    }
    format!("{:.0}%", value as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn full_half_and_empty() {
        assert_eq!(share_bar(4, 4, 4), "████");
        assert_eq!(share_bar(2, 4, 4), "██  ");
        assert_eq!(share_bar(0, 4, 4), "    ");
    }

    #[test]
    fn partial_cell_uses_eighths() {
        // 1/16 of 4 cells = 2 eighths
        assert_eq!(share_bar(1, 16, 4), "▎   ");
    }

    #[test]
    fn zero_total_is_blank() {
        assert_eq!(share_bar(3, 0, 3), "   ");
        assert_eq!(percent(3, 0), "0%");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(1, 3), "33%");
        assert_eq!(percent(2, 3), "67%");
    }
}
