//! Details overlay for the selected ticker.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::api::Ticker;
use crate::components::{Button, ButtonVariant, Modal};
use crate::ui::RenderContext;

/// Ticker details modal.
pub struct TickerDetails;

impl TickerDetails {
    pub fn render(frame: &mut Frame, area: Rect, ticker: &Ticker, ctx: &RenderContext) {
        let close = ctx.t("actions.close");
        let footer = Button::new(&close, &ctx.keybindings.back)
            .variant(ButtonVariant::Text)
            .line(&ctx.palette);
        let inner = Modal::new(&ticker.ticker)
            .size(60, 70)
            .footer(footer)
            .render(frame, area, &ctx.palette);

        frame.render_widget(
            Paragraph::new(Self::lines(ticker, ctx))
                .alignment(ctx.alignment())
                .wrap(Wrap { trim: false }),
            inner,
        );
    }

    fn lines(ticker: &Ticker, ctx: &RenderContext) -> Vec<Line<'static>> {
        let missing = ctx.t("ticker.not_available");
        let or_missing = |value: Option<&str>| {
            value
                .filter(|v| !v.is_empty())
                .map_or_else(|| missing.clone(), str::to_string)
        };

        let exchange = match ticker.primary_exchange.as_deref() {
            Some("XNAS") => ctx.t("ticker.exchange.nasdaq"),
            Some("XNYS") => ctx.t("ticker.exchange.nyse"),
            other => or_missing(other),
        };
        let status = if ticker.active {
            ctx.t("ticker.active")
        } else {
            ctx.t("ticker.inactive")
        };
        let status_color = if ticker.active {
            ctx.palette.success
        } else {
            ctx.palette.error
        };

        let mut lines = vec![
            Self::section(ctx, "ticker.company_name"),
            Line::from(or_missing(Some(ticker.name.as_str()))),
            Line::from(""),
            Self::section(ctx, "ticker.trading_information"),
            Self::field(ctx, "ticker.primary_exchange", exchange),
            Self::field(
                ctx,
                "ticker.security_type",
                or_missing(ticker.security_type.as_deref()),
            ),
            Self::field(
                ctx,
                "ticker.currency",
                or_missing(ticker.currency_name.as_deref()).to_uppercase(),
            ),
        ];
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", ctx.t("ticker.trading_status")), ctx.palette.muted()),
            Span::styled(status, Style::default().fg(status_color)),
        ]));
        lines.extend([
            Line::from(""),
            Self::section(ctx, "ticker.market_details"),
            Self::field(ctx, "ticker.market", ticker.market.to_uppercase()),
            Self::field(ctx, "ticker.locale", ticker.locale.to_uppercase()),
        ]);
        lines
    }

    fn section(ctx: &RenderContext, key: &str) -> Line<'static> {
        Line::styled(
            ctx.t(key),
            Style::default()
                .fg(ctx.palette.primary)
                .add_modifier(Modifier::BOLD),
        )
    }

    fn field(ctx: &RenderContext, key: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{}: ", ctx.t(key)), ctx.palette.muted()),
            Span::raw(value),
        ])
    }
}
