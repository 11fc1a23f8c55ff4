//! Error types for daybook.
//!
//! This module defines the centralized error type [`DaybookError`] and a type alias
//! [`Result`] used throughout the crate. Validation problems are not errors here:
//! forms report them as [`crate::app::form::FieldErrors`] values and simply refuse
//! to submit.

use thiserror::Error;

/// The main error type for daybook operations.
///
/// Only failures that cannot degrade to a safe default end up here: writing the
/// storage area, parsing configuration, or asking the CLI for a diary that does
/// not exist. Reading a malformed store is never an error (the store loads empty).
///
/// # Examples
///
/// ```
/// use daybook::DaybookError;
///
/// fn read_config() -> Result<(), DaybookError> {
///     Err(DaybookError::Config("data_dir must not be empty".to_string()))
/// }
/// assert!(read_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum DaybookError {
    /// Persisting to the storage area failed.
    ///
    /// The string describes what went wrong, typically a serialization problem.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or unreadable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No diary with the given id exists.
    #[error("Diary not found: {0}")]
    NotFound(u64),
}

/// A specialized `Result` type for daybook operations.
pub type Result<T> = std::result::Result<T, DaybookError>;
