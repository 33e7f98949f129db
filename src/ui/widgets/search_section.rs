//! Page title and search box.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

use crate::components::SearchInput;
use crate::state::InputMode;
use crate::ui::RenderContext;

pub struct SearchSection;

impl SearchSection {
    pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(3)])
            .split(area);

        let heading = vec![
            Line::styled(ctx.t("explore.title"), ctx.palette.title()),
            Line::styled(ctx.t("explore.subtitle"), ctx.palette.muted()),
        ];
        frame.render_widget(
            Paragraph::new(heading).alignment(ctx.alignment()),
            chunks[0],
        );

        let placeholder = ctx.t("explore.search.placeholder");
        let clear_hint = ctx.t("explore.search.clear");
        let explore = &ctx.store.explore;
        SearchInput {
            input: &explore.input,
            placeholder: &placeholder,
            clear_hint: &clear_hint,
            focused: ctx.store.app.input_mode == InputMode::Search,
            disabled: explore.show_details,
            rtl: ctx.is_rtl(),
        }
        .render(frame, chunks[1], &ctx.palette);
    }
}
