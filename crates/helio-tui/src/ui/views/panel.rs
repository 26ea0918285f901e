//! Notification panel overlay, anchored under the bell in the header.

use helio_core::panel::{ListView, NotificationRow, PanelState, RowAction};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::format::truncate_with_ellipsis;
use crate::ui::layout;
use crate::ui::theme::Palette;

const MARK_READ_LABEL: &str = "[mark as read]";

/// Lines a row occupies: title/time, message, priority/action, spacer
const ROW_HEIGHT: u16 = 4;

pub struct PanelProps<'a> {
    pub state: PanelState,
    pub list: &'a ListView,
    pub selected: usize,
    pub font_scale: f64,
    pub palette: &'a Palette,
}

/// Where the panel sits for a given screen area
pub fn panel_rect(screen: Rect, font_scale: f64) -> Rect {
    let width = layout::panel_width(font_scale, screen.width);
    let height = screen
        .height
        .saturating_sub(layout::HEADER_HEIGHT + layout::STATUSBAR_HEIGHT)
        .min(layout::PANEL_MAX_HEIGHT);
    Rect::new(
        screen.x + screen.width.saturating_sub(width),
        screen.y + layout::HEADER_HEIGHT,
        width,
        height,
    )
}

/// Draw the panel and return its rect plus the clickable row actions
pub fn render_panel(f: &mut Frame, screen: Rect, props: &PanelProps) -> Option<(Rect, Vec<(Rect, RowAction)>)> {
    if !props.state.is_visible() {
        return None;
    }

    let full = panel_rect(screen, props.font_scale);
    // Collapsed while animating, full size once expanded
    let area = if props.state.is_expanded() {
        full
    } else {
        layout::shrink(full)
    };
    let palette = props.palette;

    f.render_widget(Clear, area);
    let border = if props.state.is_expanded() {
        palette.border
    } else {
        palette.border_dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Line::from(Span::styled(" Notifications ", palette.title())))
        .title_bottom(Line::from(Span::styled(
            " enter read · M all read · x close ",
            palette.muted(),
        )))
        .style(Style::default().bg(palette.card));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Content only appears once the panel has expanded
    if !props.state.is_expanded() {
        return Some((area, Vec::new()));
    }

    let rows = match props.list {
        ListView::Empty => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("  No notifications", palette.muted())),
            ]);
            f.render_widget(empty, inner);
            return Some((area, Vec::new()));
        }
        ListView::Rows(rows) => rows,
    };

    // Keep the selection on screen
    let visible = (inner.height / ROW_HEIGHT).max(1) as usize;
    let first = props.selected.saturating_sub(visible - 1);

    let mut actions = Vec::new();
    for (offset, row) in rows.iter().enumerate().skip(first).take(visible) {
        let y = inner.y + ((offset - first) as u16) * ROW_HEIGHT;
        let row_area = Rect::new(inner.x, y, inner.width, ROW_HEIGHT.min(inner.bottom() - y));
        if let Some(action) = render_row(f, row_area, row, offset == props.selected, palette) {
            actions.push(action);
        }
    }

    Some((area, actions))
}

fn render_row(
    f: &mut Frame,
    area: Rect,
    row: &NotificationRow,
    selected: bool,
    palette: &Palette,
) -> Option<(Rect, RowAction)> {
    let width = area.width.saturating_sub(2) as usize;
    let bg = if selected {
        palette.selected
    } else if row.bold {
        palette.unread
    } else {
        palette.card
    };

    let title_style = if row.bold {
        palette.title()
    } else {
        palette.text()
    };
    let time_width = row.time.chars().count() + 1;
    let title_width = width.saturating_sub(time_width + 3);

    let badge = format!(" {} ", row.priority_label);
    let tone = palette.tone(row.priority_tone);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", row.icon), Style::default().fg(tone)),
            Span::styled(truncate_with_ellipsis(&row.title, title_width), title_style),
            Span::raw(" "),
            Span::styled(row.time.clone(), palette.muted()),
        ]),
        Line::from(Span::styled(
            format!("  {}", truncate_with_ellipsis(&row.message, width.saturating_sub(2))),
            palette.muted(),
        )),
    ];

    let mut third = vec![
        Span::raw("  "),
        Span::styled(badge.clone(), Style::default().fg(tone).add_modifier(Modifier::REVERSED)),
    ];
    if row.action.is_some() {
        third.push(Span::raw("  "));
        third.push(Span::styled(
            MARK_READ_LABEL,
            Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED),
        ));
    }
    lines.push(Line::from(third));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    f.render_widget(paragraph, area);

    // Clickable label position: after the indent, badge and gap
    row.action.and_then(|action| {
        let x = area.x + 2 + badge.chars().count() as u16 + 2;
        let y = area.y + 2;
        (y < area.bottom()).then(|| (Rect::new(x, y, MARK_READ_LABEL.len() as u16, 1), action))
    })
}
