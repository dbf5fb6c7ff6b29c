//! Shared popup drawing helpers.
//!
//! Usage: draw the active page as usual, then `render_backdrop`, compute a
//! dialog rect with `centered_rect_fixed` and shell it with
//! `draw_popup_frame` before drawing the popup content inside.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Block, Borders, Clear},
};

use crate::tui::Frame;

/// Dim the underlying page. Terminals have no real transparency, so this is
/// a solid dark overlay.
pub fn render_backdrop(frame: &mut Frame<'_>, area: Rect) {
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, area);
}

/// Centered rectangle of fixed size, clamped to `area`.
pub fn centered_rect_fixed(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);

    let x = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let y = area.y.saturating_add((area.height.saturating_sub(h)) / 2);

    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

/// Clear the dialog area and draw a rounded, titled frame. Returns `area`
/// for chaining.
pub fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: impl Into<String>) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title.into()))
        .borders(Borders::ALL)
        .border_set(symbols::border::ROUNDED)
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(block, area);
    area
}
