//! Inline button with a key hint.

use crate::ui::Palette;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Text,
}

/// A labelled action such as `[r] Retry`.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub key: &'a str,
    pub variant: ButtonVariant,
    pub disabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, key: &'a str) -> Self {
        Self {
            label,
            key,
            variant: ButtonVariant::default(),
            disabled: false,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn line(&self, palette: &Palette) -> Line<'a> {
        let style = if self.disabled {
            palette.muted()
        } else {
            match self.variant {
                ButtonVariant::Primary => Style::default()
                    .fg(palette.background)
                    .bg(palette.primary)
                    .add_modifier(Modifier::BOLD),
                ButtonVariant::Secondary => Style::default()
                    .fg(palette.background)
                    .bg(palette.secondary),
                ButtonVariant::Text => Style::default().fg(palette.primary),
            }
        };

        Line::from(vec![
            Span::styled(format!(" [{}] ", self.key), style),
            Span::styled(format!("{} ", self.label), style),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        frame.render_widget(Paragraph::new(self.line(palette)), area);
    }
}
