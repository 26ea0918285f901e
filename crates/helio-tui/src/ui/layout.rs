// Layout constants and rect helpers shared by the views

use ratatui::layout::Rect;

/// Horizontal padding for page content
pub const CONTENT_PADDING_H: u16 = 2;

pub const HEADER_HEIGHT: u16 = 1;
pub const FOOTER_HEIGHT: u16 = 1;
pub const STATUSBAR_HEIGHT: u16 = 1;

/// Notification panel width at 100% font scale
pub const PANEL_BASE_WIDTH: u16 = 48;
pub const PANEL_MIN_WIDTH: u16 = 30;
pub const PANEL_MAX_HEIGHT: u16 = 24;

pub const MENU_WIDTH: u16 = 34;
pub const MENU_HEIGHT: u16 = 9;

#[inline]
pub fn with_horizontal_padding(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y,
        width: area.width.saturating_sub(padding * 2),
        height: area.height,
    }
}

/// Shrink a rect by one cell on every side (the "collapsed" look while animating)
#[inline]
pub fn shrink(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[inline]
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Panel width for a font scale, bounded by the available width
pub fn panel_width(scale: f64, available: u16) -> u16 {
    let scaled = (f64::from(PANEL_BASE_WIDTH) * scale).round() as u16;
    scaled.max(PANEL_MIN_WIDTH).min(available)
}
