//! Spinner.

use crate::ui::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

const UNICODE_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const ASCII_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Animated spinner with an optional label.
pub struct Loader<'a> {
    pub tick: usize,
    pub label: &'a str,
    pub unicode: bool,
}

impl Loader<'_> {
    pub fn frame(&self) -> &'static str {
        if self.unicode {
            UNICODE_FRAMES[self.tick % UNICODE_FRAMES.len()]
        } else {
            ASCII_FRAMES[self.tick % ASCII_FRAMES.len()]
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let line = Line::from(vec![
            Span::styled(format!("{} ", self.frame()), Style::default().fg(palette.primary)),
            Span::styled(self.label.to_string(), palette.muted()),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_wrap() {
        let loader = Loader {
            tick: 12,
            label: "",
            unicode: false,
        };
        assert_eq!(loader.frame(), "|");
    }
}
