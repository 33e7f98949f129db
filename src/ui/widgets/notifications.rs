//! Toast stack rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::components::truncate_str;
use crate::state::{Notification, NotificationLevel};
use crate::ui::RenderContext;

const TOAST_HEIGHT: u16 = 3;
const MAX_TOAST_WIDTH: u16 = 50;

/// Toasts stacked in the top corner, newest first.
pub struct NotificationStackView;

impl NotificationStackView {
    pub fn render(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let width = MAX_TOAST_WIDTH.min(area.width);
        // Toasts sit on the reading-end side.
        let x = if ctx.is_rtl() {
            area.x
        } else {
            area.right().saturating_sub(width)
        };

        let mut y = area.y + 1;
        for notification in ctx.store.notifications.iter().rev() {
            if y + TOAST_HEIGHT > area.bottom() {
                break;
            }
            let toast_area = Rect {
                x,
                y,
                width,
                height: TOAST_HEIGHT,
            };
            Self::render_toast(frame, toast_area, notification, ctx);
            y += TOAST_HEIGHT;
        }
    }

    fn render_toast(frame: &mut Frame, area: Rect, notification: &Notification, ctx: &RenderContext) {
        frame.render_widget(Clear, area);

        let color = ctx.palette.level(notification.level);
        let icon = match (notification.level, ctx.unicode) {
            (NotificationLevel::Info, true) => "ℹ",
            (NotificationLevel::Success, true) => "✓",
            (NotificationLevel::Warning, true) => "⚠",
            (NotificationLevel::Error, true) => "✗",
            (_, false) => "!",
        };

        let max = usize::from(area.width.saturating_sub(6));
        let content = Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(color)),
            Span::raw(truncate_str(&notification.message, max)),
        ]);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .style(ctx.palette.base())
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}
