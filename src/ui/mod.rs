//! UI rendering using ratatui.
//!
//! This module contains all TUI views and rendering logic. Views only read
//! the [`Store`]; everything they need to render is gathered in a
//! [`RenderContext`].

mod layout;
mod theme;
mod widgets;

pub use layout::{CARD_HEIGHT, Layout, centered_rect, grid_columns, grid_rows};
pub use theme::Palette;
pub use widgets::{
    Header, HelpPanel, NotificationStackView, SearchSection, SplashScreen, StatusBar,
    TickerDetails, TickerGrid,
};

use crate::config::{Config, KeyBindings};
use crate::i18n;
use crate::prefs::Language;
use crate::state::{Store, View};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::Block,
};

/// Everything a view needs to draw one frame.
pub struct RenderContext<'a> {
    pub store: &'a Store,
    pub palette: Palette,
    pub language: Language,
    pub keybindings: &'a KeyBindings,
    pub unicode: bool,
    pub show_help_bar: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(store: &'a Store, config: &'a Config) -> Self {
        Self {
            store,
            palette: Palette::for_mode(&config.theme, store.theme.mode),
            language: store.language.current(),
            keybindings: &config.keybindings,
            unicode: config.ui.unicode_symbols,
            show_help_bar: config.ui.show_help_bar,
        }
    }

    /// Translate `key` into the current language.
    pub fn t(&self, key: &str) -> String {
        i18n::t(self.language, key)
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        i18n::t_with(self.language, key, args)
    }

    pub fn is_rtl(&self) -> bool {
        self.language.is_rtl()
    }

    /// Text alignment for the reading direction.
    pub fn alignment(&self) -> Alignment {
        if self.is_rtl() {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }
}

/// Grid columns and visible card rows for a terminal of size `area`.
pub fn viewport(area: Rect, show_help_bar: bool) -> (usize, usize) {
    let layout = Layout::new(area, show_help_bar);
    let grid_height = layout.main_area.height.saturating_sub(1);
    (grid_columns(area.width), grid_rows(grid_height))
}

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, ctx: &RenderContext) {
        let area = frame.area();
        frame.render_widget(Block::default().style(ctx.palette.base()), area);

        match ctx.store.app.current_view {
            View::Splash => SplashScreen::render(frame, area, ctx),
            View::Explore => {
                let layout = Layout::new(area, ctx.show_help_bar);
                Header::render(frame, layout.header_area, ctx);
                SearchSection::render(frame, layout.search_area, ctx);
                TickerGrid::render(frame, layout.main_area, ctx);
                if ctx.show_help_bar {
                    StatusBar::render(frame, layout.help_bar_area, ctx);
                }

                if ctx.store.explore.show_details
                    && let Some(ticker) = ctx.store.explore.selected_ticker()
                {
                    TickerDetails::render(frame, area, ticker, ctx);
                }
            }
        }

        if ctx.store.app.show_help {
            HelpPanel::render(frame, area, ctx);
        }

        NotificationStackView::render(frame, area, ctx);
    }
}
