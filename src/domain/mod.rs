//! Domain layer for the Startpage plugin.
//!
//! Plain data types shared by every other layer, free of Zellij APIs and
//! storage concerns.
//!
//! # Organization
//!
//! - [`bookmark`]: Bookmark model
//! - [`command`]: The fixed `:` command catalog
//! - [`error`]: Error type and result alias
//! - [`settings`]: Appearance and search settings
//!
//! # Examples
//!
//! ```
//! use startpage::domain::{Bookmark, Command, Settings};
//!
//! let bookmark = Bookmark::new("Rust", "https://www.rust-lang.org", ["lang"]);
//! assert!(Command::lookup(":list").is_some());
//! assert!(Settings::default().search_engine_base().starts_with("https://"));
//! # let _ = bookmark;
//! ```

pub mod bookmark;
pub mod command;
pub mod error;
pub mod settings;

pub use bookmark::Bookmark;
pub use command::{Command, CommandKind, COMMANDS};
pub use error::{Result, StartpageError};
pub use settings::Settings;
