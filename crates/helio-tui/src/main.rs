mod cli;
mod input;
mod page_source;
mod render;
mod runtime;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use helio_core::accessibility::{AccessibilityController, ProcessSpeechEngine};
use helio_core::config::CoreConfig;
use helio_core::store::{FileStore, LoadSource, NotificationStore};
use helio_core::tracing_setup::init_tracing;
use helio_core::NotificationPanelController;

use crate::cli::{run_command, Cli};
use crate::page_source::{spawn_load, PageSource};
use crate::runtime::run_app;
use crate::ui::toasts::Toast;
use crate::ui::{App, PageStatus};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = CoreConfig::load(cli.data_dir.clone())?;
    info!(data_dir = %config.data_dir.display(), "Starting helio-tui");
    let kv = FileStore::new(&config.data_dir);
    let mut store = NotificationStore::open(kv.clone());

    if let Some(command) = cli.command {
        return run_command(command, &mut store, &mut std::io::stdout().lock());
    }

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    let load_source = store.last_load_source();
    let panel = NotificationPanelController::new(store);
    let access = AccessibilityController::new(kv, ProcessSpeechEngine::new(config.speech.clone()));

    let source = PageSource::parse(cli.page.as_deref());
    let page_status = PageStatus::Loading(source.describe().to_string());
    let page_rx = spawn_load(source);

    let mut app = App::new(panel, access, page_status);
    match load_source {
        LoadSource::SeededAfterCorruption => {
            app.notify(Toast::warning("Stored notifications were unreadable and have been reset"));
        }
        LoadSource::SeededAfterReadError => {
            app.notify(Toast::error("Could not read stored notifications"));
        }
        LoadSource::Persisted | LoadSource::Seeded => {}
    }

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app, page_rx).await;
    ui::restore_terminal()?;

    result
}
