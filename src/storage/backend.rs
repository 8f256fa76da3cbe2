//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait over the two persistent buckets:
//! settings and bookmarks. The trait is deliberately small; each method maps
//! to one worker operation.

use crate::domain::error::Result;
use crate::domain::{Bookmark, Settings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One of the two persisted buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Settings,
    Bookmarks,
}

impl Bucket {
    /// File name of the bucket inside the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Settings => "settings.json",
            Self::Bookmarks => "bookmarks.json",
        }
    }
}

/// Raw contents of both buckets. `None` means absent or unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredBuckets {
    pub settings: Option<Settings>,
    pub bookmarks: Option<Vec<Bookmark>>,
}

impl StoredBuckets {
    /// Both buckets, if both are present. Otherwise the seed file is consulted.
    #[must_use]
    pub fn into_complete(self) -> Option<(Settings, Vec<Bookmark>)> {
        self.settings.zip(self.bookmarks)
    }
}

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): one JSON file per bucket
///   with atomic writes (default)
///
/// # Examples
///
/// ```no_run
/// use startpage::storage::{JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/startpage"))?;
/// let buckets = storage.load()?;
/// println!("settings stored: {}", buckets.settings.is_some());
/// # Ok::<(), startpage::StartpageError>(())
/// ```
pub trait Storage: Send {
    /// Reads both buckets.
    ///
    /// A bucket that is missing or does not parse comes back as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a bucket exists but cannot be read.
    fn load(&self) -> Result<StoredBuckets>;

    /// Replaces the settings bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    fn save_settings(&mut self, settings: &Settings) -> Result<()>;

    /// Replaces the bookmarks bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    fn save_bookmarks(&mut self, bookmarks: &[Bookmark]) -> Result<()>;

    /// Replaces the given buckets together; `None` leaves a bucket untouched.
    ///
    /// Either every given bucket is replaced or, on error, none is.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or a write fails.
    fn save_buckets(&mut self, settings: Option<&Settings>, bookmarks: Option<&[Bookmark]>) -> Result<()>;

    /// Removes both buckets. Missing buckets are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing bucket cannot be removed.
    fn clear_all(&mut self) -> Result<()>;

    /// Location of a bucket on disk, whether or not it exists yet.
    fn bucket_path(&self, bucket: Bucket) -> PathBuf;
}
