//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Minimum terminal width for each grid column count (lg, md, sm; xs is one column).
const BREAKPOINTS: [(u16, usize); 3] = [(120, 4), (90, 3), (60, 2)];

/// Height of one ticker card in rows.
pub const CARD_HEIGHT: u16 = 5;

/// UI layout areas of the explore view.
pub struct Layout {
    /// Header bar (logo, theme, language).
    pub header_area: Rect,
    /// Title and search input.
    pub search_area: Rect,
    /// Ticker grid.
    pub main_area: Rect,
    /// Key hints.
    pub help_bar_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_help_bar: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(u16::from(show_help_bar)),
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            search_area: chunks[1],
            main_area: chunks[2],
            help_bar_area: chunks[3],
        }
    }
}

/// Number of grid columns for a terminal `width`.
pub fn grid_columns(width: u16) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(min, _)| width >= *min)
        .map_or(1, |(_, columns)| *columns)
}

/// Number of card rows that fit in `height`.
pub fn grid_rows(height: u16) -> usize {
    usize::from((height / CARD_HEIGHT).max(1))
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(40), 1);
        assert_eq!(grid_columns(60), 2);
        assert_eq!(grid_columns(100), 3);
        assert_eq!(grid_columns(130), 4);
        assert_eq!(grid_columns(200), 4);
    }

    #[test]
    fn test_grid_rows() {
        assert_eq!(grid_rows(2), 1);
        assert_eq!(grid_rows(20), 4);
    }
}
