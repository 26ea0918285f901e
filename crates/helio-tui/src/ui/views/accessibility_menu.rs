use helio_core::accessibility::ReadState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::layout;
use crate::ui::theme::Palette;

pub struct MenuProps<'a> {
    pub read_state: ReadState,
    pub font_percent: u32,
    pub high_contrast: bool,
    pub palette: &'a Palette,
}

/// Bottom-right, just above the status bar
pub fn menu_rect(screen: Rect) -> Rect {
    let width = layout::MENU_WIDTH.min(screen.width);
    let height = layout::MENU_HEIGHT.min(screen.height.saturating_sub(layout::STATUSBAR_HEIGHT));
    Rect::new(
        screen.x + screen.width - width,
        (screen.y + screen.height).saturating_sub(layout::STATUSBAR_HEIGHT + height),
        width,
        height,
    )
}

fn read_icon(state: ReadState) -> &'static str {
    match state {
        ReadState::Idle => "🔊",
        ReadState::Reading => "⏸",
        ReadState::Paused => "▶",
    }
}

pub fn render_menu(f: &mut Frame, screen: Rect, props: &MenuProps) -> Rect {
    let area = menu_rect(screen);
    let palette = props.palette;
    f.render_widget(Clear, area);

    let key = |k: &str| Span::styled(format!(" {} ", k), Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
    let lines = vec![
        Line::from(vec![
            key("r"),
            Span::styled(
                format!("{} {}", read_icon(props.read_state), props.read_state.button_label()),
                palette.text(),
            ),
        ]),
        Line::from(vec![key("+"), Span::styled("Larger text", palette.text())]),
        Line::from(vec![key("-"), Span::styled("Smaller text", palette.text())]),
        Line::from(vec![
            key("c"),
            Span::styled(
                if props.high_contrast {
                    "High contrast: on"
                } else {
                    "High contrast: off"
                },
                palette.text(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Text size {}%", props.font_percent),
            palette.muted(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Line::from(Span::styled(" Accessibility ", palette.title())))
        .style(Style::default().bg(palette.card));
    f.render_widget(Paragraph::new(lines).block(block), area);
    area
}
