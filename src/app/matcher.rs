//! Match predicates for bookmarks and commands.
//!
//! Bookmarks match on a case-insensitive substring of name, URL, or any tag.
//! Commands match on a case-insensitive prefix of their name. Neither scores
//! or reorders results; callers keep the source order.

use crate::domain::{Bookmark, Command};

/// Returns `true` if `query` occurs in the bookmark's name, URL, or any tag.
///
/// Both sides are lowercased; the query is not trimmed.
///
/// # Examples
///
/// ```
/// use startpage::app::matcher::bookmark_matches;
/// use startpage::Bookmark;
///
/// let github = Bookmark::new("GitHub", "https://github.com", ["dev"]);
/// assert!(bookmark_matches(&github, "GIT"));
/// assert!(bookmark_matches(&github, "dev"));
/// assert!(!bookmark_matches(&github, "gitlab"));
/// ```
#[must_use]
pub fn bookmark_matches(bookmark: &Bookmark, query: &str) -> bool {
    let query = query.to_lowercase();
    bookmark.name.to_lowercase().contains(&query)
        || bookmark.url.to_lowercase().contains(&query)
        || bookmark
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
}

/// Returns `true` if the command name starts with the lowercased query.
///
/// # Examples
///
/// ```
/// use startpage::app::matcher::command_matches;
/// use startpage::domain::Command;
///
/// let list = Command::lookup(":list").unwrap();
/// assert!(command_matches(&list, ":LI"));
/// assert!(!command_matches(&list, "ist"));
/// ```
#[must_use]
pub fn command_matches(command: &Command, query: &str) -> bool {
    command.name.starts_with(&query.to_lowercase())
}

/// Finds the first case-insensitive occurrence of `query` in `text`.
///
/// Returns a `(start, end)` range in character indices, suitable for result
/// highlighting. Returns `None` when there is no match, when the query is
/// empty, or when lowercasing changes the character count of `text` (the
/// indices would not line up).
#[must_use]
pub fn highlight_range(text: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }

    let lower_text = text.to_lowercase();
    let lower_query = query.to_lowercase();
    if lower_text.chars().count() != text.chars().count() {
        return None;
    }

    let byte_start = lower_text.find(&lower_query)?;
    let start = lower_text[..byte_start].chars().count();
    Some((start, start + lower_query.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::COMMANDS;

    fn bookmark() -> Bookmark {
        Bookmark::new("Rust Docs", "https://doc.rust-lang.org", ["Reference", "std"])
    }

    #[test]
    fn matches_name_url_and_tags() {
        let b = bookmark();
        assert!(bookmark_matches(&b, "docs"));
        assert!(bookmark_matches(&b, "rust-lang"));
        assert!(bookmark_matches(&b, "refer"));
        assert!(bookmark_matches(&b, "STD"));
    }

    #[test]
    fn query_is_not_trimmed() {
        let b = bookmark();
        assert!(bookmark_matches(&b, "rust docs"));
        assert!(!bookmark_matches(&b, " docs "));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(bookmark_matches(&bookmark(), ""));
    }

    #[test]
    fn commands_match_by_prefix_only() {
        let matched: Vec<&str> = COMMANDS
            .iter()
            .filter(|c| command_matches(c, ":i"))
            .map(|c| c.name)
            .collect();
        assert_eq!(matched, vec![":import"]);

        assert!(COMMANDS.iter().all(|c| !command_matches(c, "list")));
        assert!(COMMANDS.iter().all(|c| command_matches(c, ":")));
    }

    #[test]
    fn highlight_range_uses_char_indices() {
        assert_eq!(highlight_range("GitHub", "hub"), Some((3, 6)));
        assert_eq!(highlight_range("Café Noir", "noir"), Some((5, 9)));
        assert_eq!(highlight_range("GitHub", ""), None);
        assert_eq!(highlight_range("GitHub", "lab"), None);
    }
}
