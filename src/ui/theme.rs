//! Resolved terminal colors for the active theme mode.

use crate::config::{ThemeColors, ThemeConfig};
use crate::prefs::ThemeMode;
use crate::state::NotificationLevel;
use ratatui::style::{Color, Modifier, Style};

/// Colors ready for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub selection: Color,
}

impl Palette {
    /// Palette for `mode` from the configured colors.
    pub fn for_mode(theme: &ThemeConfig, mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::from_colors(&theme.light, &Self::light()),
            ThemeMode::Dark => Self::from_colors(&theme.dark, &Self::dark()),
        }
    }

    /// Parse configured hex colors, keeping `fallback` for invalid entries.
    pub fn from_colors(colors: &ThemeColors, fallback: &Palette) -> Self {
        Self {
            primary: parse_color(&colors.primary, fallback.primary),
            secondary: parse_color(&colors.secondary, fallback.secondary),
            success: parse_color(&colors.success, fallback.success),
            warning: parse_color(&colors.warning, fallback.warning),
            error: parse_color(&colors.error, fallback.error),
            background: parse_color(&colors.background, fallback.background),
            surface: parse_color(&colors.surface, fallback.surface),
            foreground: parse_color(&colors.foreground, fallback.foreground),
            muted: parse_color(&colors.muted, fallback.muted),
            border: parse_color(&colors.border, fallback.border),
            selection: parse_color(&colors.selection, fallback.selection),
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            background: Color::White,
            surface: Color::White,
            foreground: Color::Black,
            muted: Color::DarkGray,
            border: Color::Gray,
            selection: Color::LightBlue,
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::LightMagenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            background: Color::Black,
            surface: Color::Black,
            foreground: Color::White,
            muted: Color::Gray,
            border: Color::DarkGray,
            selection: Color::DarkGray,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn level(&self, level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Info => self.primary,
            NotificationLevel::Success => self.success,
            NotificationLevel::Warning => self.warning,
            NotificationLevel::Error => self.error,
        }
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(value, "Invalid theme color");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_colors_parse() {
        let palette = Palette::for_mode(&ThemeConfig::default(), ThemeMode::Dark);
        assert_eq!(palette.background, Color::Rgb(0x12, 0x12, 0x12));
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let colors = ThemeColors {
            primary: "not-a-color".to_string(),
            ..ThemeColors::light()
        };
        let palette = Palette::from_colors(&colors, &Palette::light());
        assert_eq!(palette.primary, Color::Blue);
    }
}
