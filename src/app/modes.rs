//! Result modes and the mode resolver.
//!
//! Every query change runs [`resolve_mode`], which decides what the result
//! list shows. Exactly one [`Mode`] is active at a time and it carries its own
//! matches, so "which list is active" never has to be inferred.
//!
//! # Resolution rules
//!
//! First matching rule wins:
//!
//! 1. Empty query: [`Mode::ListAll`] when the sticky list flag is set,
//!    otherwise [`Mode::Empty`].
//! 2. Query starting with `:`: [`Mode::CommandSuggest`] with the catalog
//!    commands whose name starts with the lowercased query. Clears the sticky
//!    flag.
//! 3. Anything else: [`Mode::Filter`] with the matching bookmarks in their
//!    original order.
//!
//! # Example
//!
//! ```rust
//! use startpage::app::modes::{resolve_mode, Mode};
//! use startpage::Bookmark;
//!
//! let bookmarks = vec![Bookmark::new("GitHub", "https://github.com", ["dev"])];
//! let resolved = resolve_mode("git", false, &bookmarks);
//! assert!(matches!(resolved.mode, Mode::Filter(ref m) if m.len() == 1));
//! ```

use super::matcher::{bookmark_matches, command_matches};
use crate::domain::{Bookmark, Command, COMMANDS};

/// What the result list currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Nothing typed and no sticky list.
    #[default]
    Empty,
    /// Every bookmark, entered through `:list`.
    ListAll(Vec<Bookmark>),
    /// Commands whose name starts with the query.
    CommandSuggest(Vec<Command>),
    /// Bookmarks matching the query.
    Filter(Vec<Bookmark>),
}

impl Mode {
    /// Number of selectable entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::ListAll(bookmarks) | Self::Filter(bookmarks) => bookmarks.len(),
            Self::CommandSuggest(commands) => commands.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bookmark matches, for `ListAll` and `Filter`.
    #[must_use]
    pub fn bookmarks(&self) -> Option<&[Bookmark]> {
        match self {
            Self::ListAll(bookmarks) | Self::Filter(bookmarks) => Some(bookmarks),
            Self::Empty | Self::CommandSuggest(_) => None,
        }
    }

    /// Command matches, for `CommandSuggest`.
    #[must_use]
    pub fn commands(&self) -> Option<&[Command]> {
        match self {
            Self::CommandSuggest(commands) => Some(commands),
            _ => None,
        }
    }

    /// Short label used in the header and in traces.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::ListAll(_) => "all bookmarks",
            Self::CommandSuggest(_) => "commands",
            Self::Filter(_) => "bookmarks",
        }
    }
}

/// Output of [`resolve_mode`]: the new mode plus the updated sticky flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeResolution {
    pub mode: Mode,
    pub sticky_list_all: bool,
}

/// Classifies a raw query into a [`Mode`].
///
/// Pure: identical inputs always produce identical output. The caller resets
/// the cursor whenever it installs the result.
///
/// # Parameters
///
/// * `query` - The raw search box text, untrimmed
/// * `sticky_list_all` - Whether `:list` is still in effect
/// * `bookmarks` - The full bookmark set, in display order
#[must_use]
pub fn resolve_mode(query: &str, sticky_list_all: bool, bookmarks: &[Bookmark]) -> ModeResolution {
    if query.is_empty() {
        let mode = if sticky_list_all {
            Mode::ListAll(bookmarks.to_vec())
        } else {
            Mode::Empty
        };
        return ModeResolution {
            mode,
            sticky_list_all,
        };
    }

    if query.starts_with(':') {
        let matches = COMMANDS
            .iter()
            .filter(|command| command_matches(command, query))
            .copied()
            .collect();
        return ModeResolution {
            mode: Mode::CommandSuggest(matches),
            sticky_list_all: false,
        };
    }

    let matches = bookmarks
        .iter()
        .filter(|bookmark| bookmark_matches(bookmark, query))
        .cloned()
        .collect();
    ModeResolution {
        mode: Mode::Filter(matches),
        sticky_list_all,
    }
}
