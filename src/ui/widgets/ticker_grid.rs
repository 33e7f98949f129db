//! Responsive grid of ticker cards with its loading, empty and error states.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::api::Ticker;
use crate::components::{Button, ButtonVariant, Card, Loader, truncate_str};
use crate::state::ExploreError;
use crate::ui::{CARD_HEIGHT, RenderContext, grid_rows};

/// Ticker grid widget.
pub struct TickerGrid;

impl TickerGrid {
    /// Render the grid, or the state that replaces it.
    pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let explore = &ctx.store.explore;

        if explore.is_initial_loading() {
            Self::render_skeleton(frame, area, ctx);
            return;
        }

        if let Some(error) = &explore.error
            && !explore.has_results()
        {
            Self::render_error(frame, area, error, ctx);
            return;
        }

        if explore.is_empty() {
            Self::render_empty(frame, area, ctx);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        Self::render_cards(frame, chunks[0], ctx);
        Self::render_footer(frame, chunks[1], ctx);
    }

    /// Index of the first visible row so the selection stays on screen.
    fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
        (selected_row + 1).saturating_sub(visible_rows.max(1))
    }

    fn cells(area: Rect, columns: usize, rows: usize) -> Vec<Rect> {
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); rows])
            .split(area);

        row_areas
            .iter()
            .flat_map(|row| {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                    .split(*row)
                    .to_vec()
            })
            .collect()
    }

    fn render_cards(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let explore = &ctx.store.explore;
        let columns = explore.columns.max(1);
        let rows = grid_rows(area.height);
        let first_row = Self::first_visible_row(explore.selected / columns, rows);
        let skip = first_row * columns;

        let cells = Self::cells(area, columns, rows);
        let mut tickers = explore.tickers().enumerate().skip(skip);

        for cell in cells {
            let Some((index, ticker)) = tickers.next() else {
                break;
            };
            Self::card(ticker, index == explore.selected, cell, ctx)
                .render(frame, cell, &ctx.palette);
        }
    }

    fn card<'a>(ticker: &'a Ticker, selected: bool, cell: Rect, ctx: &RenderContext) -> Card<'a> {
        let palette = &ctx.palette;
        let width = usize::from(cell.width.saturating_sub(4));

        let exchange = ticker
            .exchange_display()
            .map(str::to_string)
            .unwrap_or_else(|| ctx.t("ticker.not_available"));
        let kind = ticker.security_type.as_deref().unwrap_or_default();

        let (status_key, status_color) = if ticker.active {
            ("ticker.active", palette.success)
        } else {
            ("ticker.inactive", palette.error)
        };

        let body = vec![
            Line::from(truncate_str(&ticker.name, width)),
            Line::styled(
                truncate_str(&format!("{exchange} · {kind}"), width),
                palette.muted(),
            ),
            Line::from(Span::styled(
                format!("● {}", ctx.t(status_key)),
                Style::default().fg(status_color),
            )),
        ];

        Card {
            title: &ticker.ticker,
            body,
            selected,
            loading: false,
            rtl: ctx.is_rtl(),
        }
    }

    fn render_skeleton(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let columns = ctx.store.explore.columns.max(1);
        let rows = grid_rows(area.height);
        for cell in Self::cells(area, columns, rows) {
            Card::skeleton().render(frame, cell, &ctx.palette);
        }
    }

    fn render_footer(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let explore = &ctx.store.explore;

        if explore.is_fetching_next_page() {
            let label = ctx.t("actions.loading_more");
            Loader {
                tick: ctx.store.app.tick_count,
                label: &label,
                unicode: ctx.unicode,
            }
            .render(frame, area, &ctx.palette);
            return;
        }

        let retry = ctx.t("actions.retry");
        let line = if let Some(error) = &explore.error {
            let mut spans = vec![Span::styled(
                format!("{} ", Self::error_message(error, ctx)),
                Style::default().fg(ctx.palette.error),
            )];
            spans.extend(
                Button::new(&retry, &ctx.keybindings.refresh)
                    .variant(ButtonVariant::Text)
                    .line(&ctx.palette)
                    .spans,
            );
            Line::from(spans)
        } else if explore.has_next_page() {
            let count = explore.pages.len().to_string();
            Line::styled(
                ctx.t_with("explore.search.results_found", &[("count", count.as_str())]),
                ctx.palette.muted(),
            )
        } else {
            Line::styled(ctx.t("actions.end_of_results"), ctx.palette.muted())
        };

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    /// User-facing text for a failed load.
    pub fn error_message(error: &ExploreError, ctx: &RenderContext) -> String {
        match error {
            ExploreError::Configuration => ctx.t("explore.error.configuration"),
            ExploreError::Network => ctx.t("explore.error.connectivity"),
            ExploreError::RateLimited(message) | ExploreError::Other(message) => message.clone(),
        }
    }

    fn render_error(frame: &mut Frame, area: Rect, error: &ExploreError, ctx: &RenderContext) {
        let retry = ctx.t("actions.retry");
        let lines = vec![
            Line::from(""),
            Line::styled(
                ctx.t("explore.error.title"),
                Style::default().fg(ctx.palette.error),
            ),
            Line::from(""),
            Line::from(Self::error_message(error, ctx)),
            Line::from(""),
            Button::new(&retry, &ctx.keybindings.refresh).line(&ctx.palette),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_empty(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let term = &ctx.store.explore.search_term;
        let (title, description) = if term.is_empty() {
            (
                ctx.t("explore.search.no_data_available"),
                ctx.t("explore.search.no_data_description"),
            )
        } else {
            (
                ctx.t("explore.search.no_results"),
                ctx.t_with("explore.search.no_results_description", &[("query", term.as_str())]),
            )
        };

        let lines = vec![
            Line::from(""),
            Line::styled(title, ctx.palette.title()),
            Line::from(""),
            Line::styled(description, ctx.palette.muted()),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
