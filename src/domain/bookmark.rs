//! Bookmark domain model.
//!
//! A bookmark is a named URL with an ordered list of free-form tags. Bookmarks
//! are owned by the storage layer; the search engine only ever reads them.

use serde::{Deserialize, Serialize};

/// A saved link shown in the start page results.
///
/// The JSON shape (`name`, `url`, `tags`) is shared by the storage buckets,
/// the seed file, and export documents. A missing `tags` array deserializes as
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Bookmark {
    /// Creates a bookmark from its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use startpage::Bookmark;
    ///
    /// let bookmark = Bookmark::new("GitHub", "https://github.com", ["dev"]);
    /// assert_eq!(bookmark.tags, vec!["dev".to_string()]);
    /// ```
    pub fn new<I, S>(name: impl Into<String>, url: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            url: url.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Renders the tags the way the result list shows them (`#dev #rust`).
    #[must_use]
    pub fn tag_line(&self) -> String {
        self.tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
