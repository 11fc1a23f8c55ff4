//! Structured logging to a rotating file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → daybook.log (+ backups)
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust,no_run
//! use daybook::observability::init_tracing;
//! use daybook::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("daybook started");
//! ```
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `file_writer`: size-rotated log file

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
