//! Document shapes for the persistence layer.
//!
//! These types describe what lives on disk (the seed file, export documents)
//! and what the worker hands back to the plugin after a load. The domain types
//! they wrap stay free of storage concerns.

use crate::domain::{Bookmark, Settings};
use serde::{Deserialize, Serialize};

/// Where the effective data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Both storage buckets were present.
    Storage,
    /// At least one bucket was missing; the seed file filled in.
    Seed,
    /// Neither storage nor the seed file was usable.
    Defaults,
}

/// Settings and bookmarks as the plugin sees them after a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartpageData {
    pub settings: Settings,
    pub bookmarks: Vec<Bookmark>,
    pub source: DataSource,
}

impl StartpageData {
    /// Built-in defaults: default settings and no bookmarks.
    ///
    /// # Examples
    ///
    /// ```
    /// use startpage::storage::{DataSource, StartpageData};
    ///
    /// let data = StartpageData::defaults();
    /// assert!(data.bookmarks.is_empty());
    /// assert_eq!(data.source, DataSource::Defaults);
    /// ```
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            settings: Settings::default(),
            bookmarks: Vec::new(),
            source: DataSource::Defaults,
        }
    }
}

/// The seed file (`data.json`): `{ "config": {...}, "bookmarks": [...] }`.
///
/// Either half may be missing; the loader fills the gap with defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub config: Option<Settings>,
    #[serde(default)]
    pub bookmarks: Option<Vec<Bookmark>>,
}

/// File written by `:export` and read back by `:import`.
///
/// ```json
/// {
///   "config": { "searchEngine": "https://www.startpage.com/search?q=" },
///   "bookmarks": [{ "name": "GitHub", "url": "https://github.com", "tags": ["dev"] }],
///   "exportDate": "2024-05-01T09:30:00.000Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub config: Settings,
    pub bookmarks: Vec<Bookmark>,
    #[serde(rename = "exportDate")]
    pub export_date: String,
}

/// The validated parts of an import file.
///
/// At least one of the two is `Some`; only present parts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedData {
    pub settings: Option<Settings>,
    pub bookmarks: Option<Vec<Bookmark>>,
}
