//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "daybook.log";

/// Initializes the tracing subscriber with rotating file output.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.log_level`
/// 3. Default: `"info"`
///
/// # File Location
///
/// `config.log_file` if set, otherwise `<data_dir>/daybook.log`.
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Silently does nothing if the directory cannot be created (logging is optional)
/// - Idempotent: only the first successful call installs a subscriber
pub fn init_tracing(config: &Config) {
    let log_file = config
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join(LOG_FILE_NAME));

    if let Some(parent) = log_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.log_level.as_deref().unwrap_or("info"))
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(FileWriter::new(log_file));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}
