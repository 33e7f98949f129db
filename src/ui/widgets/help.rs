//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::components::Modal;
use crate::ui::RenderContext;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let kb = ctx.keybindings;
        let rows: [(String, &str); 13] = [
            (format!("{}/{}/{}/{}", kb.up, kb.down, kb.left, kb.right), "help.move"),
            ("PgUp/PgDn".to_string(), "help.page"),
            ("g/G".to_string(), "help.top_bottom"),
            (kb.select.clone(), "help.details"),
            (kb.search.clone(), "help.search"),
            ("Esc".to_string(), "help.clear_search"),
            (kb.refresh.clone(), "help.refresh"),
            (kb.toggle_theme.clone(), "help.theme"),
            (kb.system_theme.clone(), "help.system_theme"),
            (kb.toggle_language.clone(), "help.language"),
            (kb.dismiss.clone(), "help.dismiss"),
            (kb.help.clone(), "help.toggle_help"),
            (kb.quit.clone(), "help.quit"),
        ];

        let key_style = Style::default().fg(ctx.palette.primary);
        let mut lines = vec![
            Line::from(Span::styled(
                ctx.t("help.navigation"),
                Style::default()
                    .fg(ctx.palette.warning)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(rows.into_iter().map(|(keys, description)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10} "), key_style),
                Span::raw(ctx.t(description)),
            ])
        }));

        let title = ctx.t("help.title");
        let inner = Modal::new(&title)
            .size(60, 80)
            .render(frame, area, &ctx.palette);
        frame.render_widget(Paragraph::new(lines).alignment(ctx.alignment()), inner);
    }
}
