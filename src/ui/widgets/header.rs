//! Top bar with brand, theme and language.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::components::Logo;
use crate::prefs::{ThemeMode, ThemePreference};
use crate::ui::RenderContext;

/// Header bar widget.
pub struct Header;

impl Header {
    /// Render the header bar.
    pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let palette = &ctx.palette;
        let style = Style::default().fg(palette.foreground).bg(palette.surface);

        let brand = Line::from(vec![
            Span::styled(
                format!(" {} ", Logo::TEXT),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(ctx.t("app.name"), palette.muted()),
        ]);

        let theme = &ctx.store.theme;
        let (icon, mode_key) = match (theme.mode, ctx.unicode) {
            (ThemeMode::Light, true) => ("☀", "header.theme_light"),
            (ThemeMode::Dark, true) => ("☾", "header.theme_dark"),
            (ThemeMode::Light, false) => ("*", "header.theme_light"),
            (ThemeMode::Dark, false) => ("o", "header.theme_dark"),
        };
        let mut mode = format!("{icon} {}", ctx.t(mode_key));
        if theme.preference == ThemePreference::System {
            mode.push_str(&format!(" ({})", ctx.t("header.theme_system")));
        }

        let settings = Line::from(vec![
            Span::styled(mode, Style::default().fg(palette.secondary)),
            Span::raw("  │  "),
            Span::styled(
                format!("{}: {} ", ctx.t("header.language"), ctx.language.native_name()),
                Style::default().fg(palette.secondary),
            ),
        ]);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        // The brand sits on the reading-start side.
        let (brand_area, settings_area, brand_align, settings_align) = if ctx.is_rtl() {
            (chunks[1], chunks[0], Alignment::Right, Alignment::Left)
        } else {
            (chunks[0], chunks[1], Alignment::Left, Alignment::Right)
        };

        frame.render_widget(
            Paragraph::new(brand).alignment(brand_align).style(style),
            brand_area,
        );
        frame.render_widget(
            Paragraph::new(settings)
                .alignment(settings_align)
                .style(style),
            settings_area,
        );
    }
}
