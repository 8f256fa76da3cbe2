//! Startpage: a Zellij plugin that turns a floating pane into a personal start page.
//!
//! One search box unifies four things:
//! - Bookmark lookup (case-insensitive substring match on name, URL, and tags)
//! - `:` commands (`:list`, `:config`, `:bookmark`, `:export`, `:import`, `:help`, `:reset`)
//! - URL navigation (`example.com` opens `https://example.com`)
//! - Web search for anything else

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Input engine
//! │  - Mode resolution and matching                     │
//! │  - Selection cursor and commit resolution           │
//! │  - Event handling and action dispatch               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON buckets│   │ - Off-thread  │
//! │ - Theming     │   │ - Seed loader │   │   storage I/O │
//! │ - Components  │   │ - Import/export│  │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Bookmark, Command, Settings, errors (domain/)    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a JSON lines file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:/path/to/startpage.wasm" {
//!     open_command "xdg-open"
//!     seed_file "~/.config/startpage/data.json"
//!     export_dir "~/Documents"
//!     theme "catppuccin-mocha"
//!     trace_level "info"
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use startpage::{handle_event, initialize, Action, Config, Event};
//!
//! let mut session = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut session, &Event::Initialize)?;
//! assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
//!
//! for c in "how to code".chars() {
//!     handle_event(&mut session, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut session, &Event::Submit)?;
//! assert_eq!(
//!     actions,
//!     vec![Action::OpenUrl {
//!         url: "https://www.startpage.com/search?q=how%20to%20code".to_string()
//!     }]
//! );
//! # Ok::<(), startpage::StartpageError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, Mode, Resolution, Session, SessionPaths};
pub use domain::{Bookmark, Command, Result, Settings, StartpageError};
pub use ui::Theme;

use infrastructure::expand_tilde;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Command used to open URLs when none is configured.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/startpage.wasm" {
///     open_command "open"
///     seed_file "~/.config/startpage/data.json"
///     theme_file "~/.config/startpage/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program that opens a URL in the browser (`xdg-open`, `open`, ...).
    pub open_command: String,

    /// Seed document loaded when storage is incomplete.
    ///
    /// Default: `data.json` in the data directory.
    pub seed_file: Option<PathBuf>,

    /// Where `:export` writes and where `:import` starts looking.
    ///
    /// Default: the data directory.
    pub export_dir: Option<PathBuf>,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    ///
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            seed_file: None,
            export_dir: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - Blank values count as unset
    /// - `seed_file`, `export_dir`, and `theme_file` expand a leading `~` to `/host`
    /// - `theme` maps to `theme_name`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::path::PathBuf;
    /// use startpage::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("open_command".to_string(), "open".to_string());
    /// map.insert("seed_file".to_string(), "~/startpage.json".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.open_command, "open");
    /// assert_eq!(config.seed_file, Some(PathBuf::from("/host/startpage.json")));
    /// assert_eq!(config.export_dir, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let path = |key: &str| value(key).map(|v| PathBuf::from(expand_tilde(&v)));

        Self {
            open_command: value("open_command").unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
            seed_file: path("seed_file"),
            export_dir: path("export_dir"),
            theme_name: value("theme"),
            theme_file: value("theme_file").map(|v| expand_tilde(&v)),
            trace_level: value("trace_level"),
        }
    }

    /// Seed file and export directory with defaults filled in.
    #[must_use]
    pub fn session_paths(&self) -> SessionPaths {
        let defaults = SessionPaths::default();
        SessionPaths {
            seed_file: self.seed_file.clone().unwrap_or(defaults.seed_file),
            export_dir: self.export_dir.clone().unwrap_or(defaults.export_dir),
        }
    }

    /// Loads the configured theme, falling back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the session for a freshly loaded plugin.
///
/// The session starts empty in [`LoadState::Pending`](app::LoadState::Pending);
/// data arrives after [`Event::Initialize`] asks the worker for it.
///
/// # Example
///
/// ```rust
/// use startpage::{initialize, Config};
///
/// let session = initialize(&Config::default());
/// assert!(session.bookmarks.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> Session {
    tracing::debug!("initializing startpage plugin");
    Session::new(config.theme(), config.session_paths())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_options_use_defaults() {
        let mut map = BTreeMap::new();
        map.insert("open_command".to_string(), "   ".to_string());
        map.insert("theme".to_string(), String::new());

        let config = Config::from_zellij(&map);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn session_paths_prefer_configured_values() {
        let config = Config {
            export_dir: Some(PathBuf::from("/host/Documents")),
            ..Config::default()
        };
        let paths = config.session_paths();
        assert_eq!(paths.export_dir, PathBuf::from("/host/Documents"));
        assert_eq!(paths.seed_file, infrastructure::default_seed_file());
    }

    #[test]
    fn unknown_theme_falls_back() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());

        let latte = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        };
        assert_eq!(latte.theme().name, "catppuccin-latte");
    }
}
