//! Paths inside the Zellij plugin sandbox.
//!
//! The host filesystem is visible under `/host`, which Zellij points at the
//! working directory it was started from (usually the user's home).

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// Directory for plugin-written files (trace output).
///
/// ```
/// use mandalguide::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/mandalguide"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/mandalguide")
}

/// Maps `~` and `~/...` onto the `/host` mount; other paths pass through.
///
/// ```
/// use mandalguide::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/mandals.toml"), "/host/mandals.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/mandals.json"), "/etc/mandals.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

/// Parses a configured path option, expanding `~`. Blank values are `None`.
#[must_use]
pub fn config_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(expand_tilde(trimmed)))
}
