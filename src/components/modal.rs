//! Centered overlay.

use crate::ui::{Palette, centered_rect};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear},
};

/// Overlay window drawn above the current view.
pub struct Modal<'a> {
    pub title: &'a str,
    pub footer: Option<Line<'a>>,
    pub percent_x: u16,
    pub percent_y: u16,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            footer: None,
            percent_x: 60,
            percent_y: 60,
        }
    }

    pub fn size(mut self, percent_x: u16, percent_y: u16) -> Self {
        self.percent_x = percent_x;
        self.percent_y = percent_y;
        self
    }

    pub fn footer(mut self, footer: Line<'a>) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Draw the frame and return the inner area for content.
    pub fn render(self, frame: &mut Frame, area: Rect, palette: &Palette) -> Rect {
        let popup = centered_rect(self.percent_x, self.percent_y, area);
        frame.render_widget(Clear, popup);

        let mut block = Block::default()
            .title(Line::styled(format!(" {} ", self.title), palette.title()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border(true))
            .style(palette.base());
        if let Some(footer) = self.footer {
            block = block.title_bottom(footer.alignment(Alignment::Right));
        }

        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        inner
    }
}
