use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::debug;

use helio_core::accessibility::SpeechEngine;
use helio_core::store::KeyValueStore;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, Tui};

/// Drives panel transitions and speech callbacks between terminal events
const TICK: Duration = Duration::from_millis(50);

pub(crate) async fn run_app<S: KeyValueStore, E: SpeechEngine>(
    terminal: &mut Tui,
    app: &mut App<S, E>,
    mut page_rx: mpsc::Receiver<Result<String, String>>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(TICK);

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                if let Some(Ok(event)) = maybe_event {
                    match event {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                                if app.pending_quit {
                                    // Second Ctrl+C - quit immediately
                                    app.quit();
                                } else {
                                    // First Ctrl+C - set pending (footer shows warning)
                                    app.pending_quit = true;
                                }
                            } else {
                                app.pending_quit = false;
                                handle_key(app, key);
                            }
                        }
                        Event::Mouse(mouse) => match mouse.kind {
                            MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
                            MouseEventKind::ScrollUp => app.scroll_page(-3),
                            MouseEventKind::ScrollDown => app.scroll_page(3),
                            _ => {}
                        },
                        _ => {}
                    }
                }
            }

            Some(result) = page_rx.recv() => {
                debug!(ok = result.is_ok(), "Page load finished");
                app.page_loaded(result);
            }

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }
        }
    }

    Ok(())
}
