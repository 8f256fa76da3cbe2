//! Path manipulation utilities for the Zellij sandbox environment.
//!
//! In the plugin sandbox the host filesystem is mounted under `/host`, which
//! points at the directory Zellij was started from (usually the user's home).
//! These helpers map between user-facing paths and sandbox paths.

use std::path::{Path, PathBuf};

/// Returns the data directory for Startpage storage.
///
/// Resolves to `/host/.local/share/zellij/startpage`, i.e.
/// `~/.local/share/zellij/startpage` when Zellij runs from the home directory.
/// The bucket files, the default seed file, and the trace file live here.
///
/// # Examples
///
/// ```
/// use startpage::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str(), Some("/host/.local/share/zellij/startpage"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("startpage")
}

/// Default location of the seed document.
#[must_use]
pub fn default_seed_file() -> PathBuf {
    get_data_dir().join("data.json")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use startpage::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/exports"), "/host/exports");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Shows a sandbox path the way the user would type it.
///
/// The inverse of [`expand_tilde`]: a `/host` prefix becomes `~`.
///
/// # Examples
///
/// ```
/// use startpage::infrastructure::display_path;
/// use std::path::Path;
///
/// assert_eq!(display_path(Path::new("/host/exports/a.json")), "~/exports/a.json");
/// assert_eq!(display_path(Path::new("/tmp/a.json")), "/tmp/a.json");
/// ```
#[must_use]
pub fn display_path(path: &Path) -> String {
    match path.strip_prefix("/host") {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Converts a sandbox path into one the host can open.
///
/// Paths under `/host` become relative to the directory mounted there, which
/// is also where panes opened by the plugin start. Other paths are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use startpage::infrastructure::host_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     host_path(Path::new("/host/.local/share/zellij/startpage/settings.json")),
///     PathBuf::from(".local/share/zellij/startpage/settings.json")
/// );
/// ```
#[must_use]
pub fn host_path(path: &Path) -> PathBuf {
    path.strip_prefix("/host")
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}
