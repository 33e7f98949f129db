//! Input event types and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => Key::Other,
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Character typed, if any, ignoring Ctrl/Alt chords.
    pub fn text_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }

    pub fn is_ctrl_c(&self) -> bool {
        self.modifiers.ctrl && matches!(self.key, Key::Char('c') | Key::Char('C'))
    }

    /// Check if this matches a key binding string (e.g., "Ctrl+q", "Enter").
    ///
    /// Single-character bindings are case-sensitive and ignore Shift, since
    /// the character already reflects it ("G", "?").
    pub fn matches(&self, binding: &str) -> bool {
        let mut expected_ctrl = false;
        let mut expected_alt = false;
        let mut expected_shift = false;
        let mut expected_key = "";

        for part in binding.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" => expected_ctrl = true,
                "alt" => expected_alt = true,
                "shift" => expected_shift = true,
                _ => expected_key = part,
            }
        }

        if self.modifiers.ctrl != expected_ctrl || self.modifiers.alt != expected_alt {
            return false;
        }

        let mut chars = expected_key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return self.key == Key::Char(c)
                || (expected_ctrl && self.key == Key::Char(c.to_ascii_uppercase()));
        }

        if self.modifiers.shift != expected_shift {
            return false;
        }

        match expected_key.to_lowercase().as_str() {
            "enter" => self.key == Key::Enter,
            "esc" | "escape" => self.key == Key::Escape,
            "backspace" => self.key == Key::Backspace,
            "delete" | "del" => self.key == Key::Delete,
            "tab" => self.key == Key::Tab,
            "up" => self.key == Key::Up,
            "down" => self.key == Key::Down,
            "left" => self.key == Key::Left,
            "right" => self.key == Key::Right,
            "home" => self.key == Key::Home,
            "end" => self.key == Key::End,
            "pageup" => self.key == Key::PageUp,
            "pagedown" => self.key == Key::PageDown,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_shifted_symbol_matches() {
        let event = key(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert!(event.matches("?"));
        assert!(!event.matches("/"));
    }

    #[test]
    fn test_char_bindings_are_case_sensitive() {
        assert!(key(KeyCode::Char('G'), KeyModifiers::SHIFT).matches("G"));
        assert!(!key(KeyCode::Char('g'), KeyModifiers::NONE).matches("G"));
    }

    #[test]
    fn test_modifier_bindings() {
        let event = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(event.matches("Ctrl+c"));
        assert!(!event.matches("c"));
        assert!(event.is_ctrl_c());
        assert_eq!(event.text_char(), None);
    }

    #[test]
    fn test_named_keys() {
        assert!(key(KeyCode::Enter, KeyModifiers::NONE).matches("Enter"));
        assert!(key(KeyCode::Esc, KeyModifiers::NONE).matches("esc"));
        assert!(!key(KeyCode::Tab, KeyModifiers::SHIFT).matches("Tab"));
    }
}
