//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::InputMode;
use crate::ui::RenderContext;

/// Bottom bar with key hints and fetch activity.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let kb = ctx.keybindings;
        let key_style = Style::default()
            .fg(ctx.palette.primary)
            .add_modifier(Modifier::BOLD);

        let hints: Vec<(&str, String)> = match ctx.store.app.input_mode {
            InputMode::Search => vec![
                ("Enter", ctx.t("help.search")),
                ("Esc", ctx.t("help.clear_search")),
            ],
            InputMode::Normal => vec![
                (kb.search.as_str(), ctx.t("help.search")),
                (kb.select.as_str(), ctx.t("help.details")),
                (kb.refresh.as_str(), ctx.t("help.refresh")),
                (kb.help.as_str(), ctx.t("help.toggle_help")),
                (kb.quit.as_str(), ctx.t("help.quit")),
            ],
        };

        let mut spans = Vec::new();
        for (key, description) in hints {
            spans.push(Span::styled(format!(" {key} "), key_style));
            spans.push(Span::styled(format!("{description}  "), ctx.palette.muted()));
        }

        if ctx.store.explore.is_fetching() {
            spans.push(Span::styled(
                ctx.t("app.loading"),
                Style::default()
                    .fg(ctx.palette.warning)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(ctx.alignment())
            .style(Style::default().bg(ctx.palette.surface));

        frame.render_widget(paragraph, area);
    }
}
