// Top bar: page title on the left, the notification bell (panel toggle) on the right

use helio_core::panel::BadgeView;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::layout;
use crate::ui::theme::Palette;

/// Bell label including the unread badge, e.g. "🔔 3"
pub fn bell_label(badge: &BadgeView) -> String {
    match badge {
        BadgeView::Hidden => " 🔔 ".to_string(),
        BadgeView::Shown(count) => format!(" 🔔 {} ", count),
    }
}

/// Render the header and return the toggle button's rect
pub fn render_header(f: &mut Frame, area: Rect, title: &str, badge: &BadgeView, palette: &Palette) -> Rect {
    let label = bell_label(badge);
    let width = (label.width() as u16).min(area.width);
    let toggle = Rect::new(area.x + area.width - width, area.y, width, 1);

    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    let header = Paragraph::new(format!("{}{}", padding, title))
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
    f.render_widget(header, area);

    let bell_style = match badge {
        BadgeView::Hidden => palette.muted(),
        BadgeView::Shown(_) => Style::default()
            .fg(palette.bg)
            .bg(palette.error)
            .add_modifier(Modifier::BOLD),
    };
    f.render_widget(Paragraph::new(Line::from(Span::styled(label, bell_style))), toggle);
    toggle
}
