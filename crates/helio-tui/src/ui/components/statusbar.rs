// Status bar at the very bottom: current toast on the left, the
// accessibility button on the right

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::theme::Palette;
use crate::ui::toasts::{Toast, ToastLevel};

const MENU_BUTTON_LABEL: &str = " ♿ Accessibility ";

/// Render the status bar and return the accessibility button's rect
pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    toast: Option<&Toast>,
    menu_open: bool,
    palette: &Palette,
) -> Rect {
    let button_width = MENU_BUTTON_LABEL.width() as u16;
    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(button_width)]).split(area);

    if let Some(toast) = toast {
        let color = match toast.level {
            ToastLevel::Info => palette.accent,
            ToastLevel::Success => palette.success,
            ToastLevel::Warning => palette.warning,
            ToastLevel::Error => palette.error,
        };
        let available = chunks[0].width.saturating_sub(4) as usize;
        let line = Line::from(vec![
            Span::styled(format!(" {} ", toast.level.icon()), Style::default().fg(color)),
            Span::styled(truncate_with_ellipsis(&toast.message, available), Style::default().fg(color)),
        ]);
        f.render_widget(Paragraph::new(line), chunks[0]);
    }

    let button_style = if menu_open {
        Style::default().fg(palette.bg).bg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.accent)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(MENU_BUTTON_LABEL, button_style))),
        chunks[1],
    );
    chunks[1]
}
