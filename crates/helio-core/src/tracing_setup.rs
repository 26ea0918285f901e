use std::fs::OpenOptions;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File that receives log output. The terminal UI owns stdout, so without
/// this variable logging is discarded.
pub const LOG_FILE_ENV: &str = "HELIO_LOG_FILE";

pub fn init_tracing() {
    init_tracing_with_service("helio-tui");
}

pub fn init_tracing_with_service(service_name: &str) {
    let Some(log_path) = std::env::var_os(LOG_FILE_ENV) else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_path.to_string_lossy(), e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    // try_init: tests and repeated calls must not panic on a second subscriber
    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!(service = service_name, "Logging to {}", log_path.to_string_lossy());
    }
}
