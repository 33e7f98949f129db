//! Brand mark.

use crate::ui::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const BANNER: [&str; 2] = ["█▄ █ ▄▀█ █▀ █▀▄ ▄▀█ █▀█", "█ ▀█ █▀█ ▄█ █▄▀ █▀█ ▀▀█"];

/// Logo in compact (one line) or banner form.
pub struct Logo {
    pub banner: bool,
}

impl Logo {
    pub const TEXT: &'static str = "NASDAQ";

    pub fn lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        let style = Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD);

        if self.banner {
            BANNER
                .iter()
                .map(|row| Line::from(Span::styled(*row, style)))
                .collect()
        } else {
            vec![Line::from(Span::styled(format!(" {} ", Self::TEXT), style))]
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        frame.render_widget(
            Paragraph::new(self.lines(palette)).alignment(Alignment::Center),
            area,
        );
    }
}
