//! Editable single-line text and the search box built on it.

use crate::ui::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Text with a cursor, counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index(self.cursor);
            self.value.remove(index);
        }
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let index = self.byte_index(self.cursor);
            self.value.remove(index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Search box with icon, placeholder and clear hint.
pub struct SearchInput<'a> {
    pub input: &'a TextInput,
    pub placeholder: &'a str,
    pub clear_hint: &'a str,
    pub focused: bool,
    pub disabled: bool,
    pub rtl: bool,
}

impl SearchInput<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let border_style = if self.disabled {
            palette.muted()
        } else {
            palette.border(self.focused)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);

        let icon = Span::styled("🔍 ", Style::default().fg(palette.muted));
        let text = if self.input.is_empty() {
            Span::styled(
                self.placeholder,
                palette.muted().add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled(self.input.value(), Style::default().fg(palette.foreground))
        };

        let mut spans = vec![icon, text];
        if !self.input.is_empty() && self.focused {
            spans.push(Span::styled(format!("  ({})", self.clear_hint), palette.muted()));
        }

        let alignment = if self.rtl {
            Alignment::Right
        } else {
            Alignment::Left
        };
        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .alignment(alignment)
                .block(block),
            area,
        );

        if self.focused && !self.disabled && !self.rtl {
            // Icon plus a space occupy three cells.
            let x = inner.x + 3 + self.input.cursor() as u16;
            if x < inner.right() {
                frame.set_cursor_position(Position::new(x, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = TextInput::new();
        for c in "AAPL".chars() {
            input.insert(c);
        }
        input.backspace();
        assert_eq!(input.value(), "AAP");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut input = TextInput::new();
        for c in "سهم".chars() {
            input.insert(c);
        }
        input.move_left();
        input.insert('x');
        assert_eq!(input.value(), "سهxم");

        input.move_home();
        input.delete();
        assert_eq!(input.value(), "هxم");

        input.move_end();
        input.move_right();
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_clear() {
        let mut input = TextInput::new();
        input.insert('a');
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
