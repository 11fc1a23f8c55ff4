//! Data directory resolution.
//!
//! The diary profile lives in one directory holding the storage entries, the
//! optional `config.toml` and the log file.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DAYBOOK_DATA_DIR";

/// Returns the data directory for daybook storage.
///
/// Resolution order:
/// 1. `$DAYBOOK_DATA_DIR`
/// 2. `$XDG_DATA_HOME/daybook`
/// 3. `$HOME/.local/share/daybook`
/// 4. `./.daybook` when no home directory is known
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(|name| std::env::var(name).ok())
}

fn resolve_data_dir(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    let non_empty = |name: &str| var(name).filter(|value| !value.trim().is_empty());

    if let Some(dir) = non_empty(DATA_DIR_ENV) {
        return PathBuf::from(expand_tilde_with(&dir, non_empty("HOME").as_deref()));
    }
    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("daybook");
    }
    non_empty("HOME").map_or_else(
        || PathBuf::from(".daybook"),
        |home| PathBuf::from(home).join(".local").join("share").join("daybook"),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use daybook::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}
