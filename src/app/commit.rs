//! Commit resolution: what pressing Enter does.
//!
//! [`resolve_commit`] looks at the active mode, the cursor, and the raw query
//! and returns exactly one [`Resolution`]. It does not perform anything; the
//! event handler turns the resolution into state changes and runtime actions.
//!
//! # Precedence
//!
//! 1. Command suggestions present: run the selected command.
//! 2. Trimmed query is exactly a command name: run that command.
//! 3. Bookmark results present (filter or full list): open the selected one.
//! 4. Non-empty query not starting with `:`: navigate if it looks like a URL,
//!    search otherwise.
//! 5. Nothing to do.

use super::cursor::Cursor;
use super::modes::Mode;
use crate::domain::{Bookmark, Command};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::LazyLock;

/// The single outcome of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Run a catalog command.
    RunCommand(Command),
    /// Open the bookmark's URL.
    OpenBookmark(Bookmark),
    /// Open a URL typed into the search box.
    Navigate(String),
    /// Open the search engine with the encoded query.
    Search(String),
    NoOp,
}

/// Decides what a commit does for the given session snapshot.
///
/// # Parameters
///
/// * `mode` - Active mode with its matches
/// * `cursor` - Selected index into the mode's matches
/// * `raw_query` - Search box text, untrimmed
/// * `search_engine` - Base URL the encoded query is appended to
///
/// # Example
///
/// ```rust
/// use startpage::app::commit::{resolve_commit, Resolution};
/// use startpage::app::cursor::Cursor;
/// use startpage::app::modes::Mode;
///
/// let resolution = resolve_commit(&Mode::Filter(vec![]), Cursor::new(), "example.com", "https://s/?q=");
/// assert_eq!(resolution, Resolution::Navigate("https://example.com".to_string()));
/// ```
#[must_use]
pub fn resolve_commit(mode: &Mode, cursor: Cursor, raw_query: &str, search_engine: &str) -> Resolution {
    if let Some(command) = mode.commands().and_then(|c| c.get(cursor.index())) {
        return Resolution::RunCommand(*command);
    }

    let query = raw_query.trim();

    if let Some(command) = Command::lookup(query) {
        return Resolution::RunCommand(command);
    }

    if let Some(bookmark) = mode.bookmarks().and_then(|b| b.get(cursor.index())) {
        return Resolution::OpenBookmark(bookmark.clone());
    }

    if query.is_empty() || query.starts_with(':') {
        return Resolution::NoOp;
    }

    if is_url(query) {
        Resolution::Navigate(with_scheme(query))
    } else {
        Resolution::Search(format!("{search_engine}{}", encode_query(query)))
    }
}

/// Characters `encode_query` leaves alone: ASCII alphanumerics plus
/// `- _ . ! ~ * ' ( )`.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Two or more dot-separated labels at the start of the query.
static DOMAIN_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9](?:[-a-zA-Z0-9]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[-a-zA-Z0-9]*[a-zA-Z0-9])?)+")
        .expect("domain prefix pattern is valid")
});

/// Returns `true` if the query should be opened as a URL rather than searched.
///
/// Explicit `http://`/`https://` URLs always qualify. Otherwise the query must
/// begin with at least two dot-separated labels, each starting and ending with
/// an ASCII letter or digit, hyphens allowed inside. Whatever follows the
/// labels is not inspected, so `node.js tutorial` counts as a URL.
///
/// # Examples
///
/// ```
/// use startpage::app::commit::is_url;
///
/// assert!(is_url("example.com"));
/// assert!(is_url("docs.rs/serde"));
/// assert!(is_url("http://localhost:8080"));
/// assert!(!is_url("how to code"));
/// assert!(!is_url("foo."));
/// assert!(!is_url("-bad.com"));
/// ```
#[must_use]
pub fn is_url(query: &str) -> bool {
    query.starts_with("http://") || query.starts_with("https://") || DOMAIN_PREFIX.is_match(query)
}

/// Prefixes `https://` unless the query already starts with `http`.
fn with_scheme(query: &str) -> String {
    if query.starts_with("http") {
        query.to_string()
    } else {
        format!("https://{query}")
    }
}

/// Percent-encodes a query component.
///
/// Keeps ASCII letters, digits, and `- _ . ! ~ * ' ( )`; every other byte of
/// the UTF-8 encoding becomes `%XX`.
///
/// # Examples
///
/// ```
/// use startpage::app::commit::encode_query;
///
/// assert_eq!(encode_query("how to code"), "how%20to%20code");
/// assert_eq!(encode_query("c++ & rust"), "c%2B%2B%20%26%20rust");
/// ```
#[must_use]
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, QUERY).to_string()
}
