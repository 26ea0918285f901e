use helio_core::accessibility::SpeechEngine;
use helio_core::store::KeyValueStore;
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::components::{render_header, render_statusbar};
use crate::ui::views::{render_menu, render_page, render_panel, MenuProps, PanelProps};
use crate::ui::{layout, theme, App, HitAreas};

const TITLE: &str = "HelioOne";

pub(crate) fn render<S: KeyValueStore, E: SpeechEngine>(f: &mut Frame, app: &mut App<S, E>) {
    let palette = theme::palette(app.access.high_contrast());
    let screen = f.area();

    f.render_widget(Block::default().style(Style::default().bg(palette.bg)), screen);

    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(screen);

    let badge = app.badge();
    let mut hit = HitAreas {
        toggle: Some(render_header(f, chunks[0], TITLE, &badge, &palette)),
        ..Default::default()
    };

    render_page(
        f,
        chunks[1],
        &app.page,
        &app.page_status,
        app.page_scroll,
        app.access.font_scale(),
        &palette,
    );

    let (footer_text, footer_style) = if app.pending_quit {
        ("Press Ctrl+C again to quit", Style::default().fg(palette.error))
    } else {
        (
            "n notifications · a accessibility · t test notification · j/k scroll · q quit",
            palette.muted(),
        )
    };
    let padding = " ".repeat(layout::CONTENT_PADDING_H as usize);
    f.render_widget(
        Paragraph::new(format!("{}{}", padding, footer_text)).style(footer_style),
        chunks[2],
    );

    hit.menu_button = Some(render_statusbar(
        f,
        chunks[3],
        app.current_toast(),
        app.access.is_menu_open(),
        &palette,
    ));

    // Overlays: the panel is drawn last so it sits above the menu
    if app.access.is_menu_open() {
        hit.menu = Some(render_menu(
            f,
            screen,
            &MenuProps {
                read_state: app.access.read_state(),
                font_percent: app.access.font_percent(),
                high_contrast: app.access.high_contrast(),
                palette: &palette,
            },
        ));
    }

    let list = app.list_view();
    if let Some((panel_area, actions)) = render_panel(
        f,
        screen,
        &PanelProps {
            state: app.panel_state(),
            list: &list,
            selected: app.selected,
            font_scale: app.access.font_scale(),
            palette: &palette,
        },
    ) {
        hit.panel = Some(panel_area);
        hit.row_actions = actions;
    }

    app.hit = hit;
}
