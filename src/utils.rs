//! Utility functions for log formatting and file system preparation.

use std::io;
use std::path::Path;
use tracing::{debug, instrument};

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` characters are cut at a character boundary and
/// an ellipsis is appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa...");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...", &s[..cut]),
    }
}

/// Ensure the directory that will hold `file` exists.
///
/// Paths without a parent component (a bare file name) need nothing.
#[instrument(level = "debug", skip_all, fields(path = %file.display()))]
pub fn ensure_parent_dir(file: &Path) -> io::Result<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            debug!(dir = %parent.display(), "Parent directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}
