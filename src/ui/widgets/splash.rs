//! Startup screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
};

use crate::components::{Loader, Logo};
use crate::ui::RenderContext;

pub struct SplashScreen;

impl SplashScreen {
    pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .flex(Flex::Center)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Logo { banner: ctx.unicode }.render(frame, chunks[0], &ctx.palette);

        let label = ctx.t("app.loading");
        Loader {
            tick: ctx.store.app.tick_count,
            label: &label,
            unicode: ctx.unicode,
        }
        .render(frame, chunks[2], &ctx.palette);
    }
}
