//! Bordered card used for grid items.

use crate::ui::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// A card with a title and body lines.
///
/// A loading card draws skeleton bars instead of its content.
pub struct Card<'a> {
    pub title: &'a str,
    pub body: Vec<Line<'a>>,
    pub selected: bool,
    pub loading: bool,
    pub rtl: bool,
}

impl<'a> Card<'a> {
    /// A placeholder card shown while the first page loads.
    pub fn skeleton() -> Self {
        Self {
            title: "",
            body: Vec::new(),
            selected: false,
            loading: true,
            rtl: false,
        }
    }

    pub fn render(self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let border_style = if self.selected {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.border(false)
        };

        let alignment = if self.rtl {
            Alignment::Right
        } else {
            Alignment::Left
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style);

        if self.loading {
            let width = usize::from(area.width.saturating_sub(4));
            let bar = "░".repeat(width);
            let short = "░".repeat(width / 2);
            let lines = vec![
                Line::styled(short, palette.muted()),
                Line::styled(bar, palette.muted()),
            ];
            frame.render_widget(Paragraph::new(lines).block(block), area);
            return;
        }

        block = block
            .title(Line::styled(self.title, palette.title()))
            .title_alignment(alignment);

        let style = if self.selected {
            Style::default().fg(palette.foreground).bg(palette.selection)
        } else {
            Style::default().fg(palette.foreground)
        };

        frame.render_widget(
            Paragraph::new(self.body)
                .alignment(alignment)
                .style(style)
                .block(block),
            area,
        );
    }
}
