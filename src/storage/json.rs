//! JSON file-based storage backend.
//!
//! Each bucket is a human-readable JSON file in the data directory. Writes go
//! to a temporary file first and are then renamed over the target, so a crash
//! never leaves a half-written bucket behind.
//!
//! # File Layout
//!
//! ```text
//! <data dir>/
//! ├── settings.json    { "searchEngine": "...", "accentColor": "...", ... }
//! └── bookmarks.json   [ { "name": "...", "url": "...", "tags": [...] } ]
//! ```

use crate::domain::error::{Result, StartpageError};
use crate::domain::{Bookmark, Settings};
use crate::storage::backend::{Bucket, Storage, StoredBuckets};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// Unlike a cached store, every [`Storage::load`] re-reads the files so edits
/// made in an external editor are picked up.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the single worker
/// thread.
#[derive(Debug)]
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use startpage::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/startpage"))?;
    /// # Ok::<(), startpage::StartpageError>(())
    /// ```
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = ?dir, "initializing JSON storage");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn read_bucket<T: DeserializeOwned>(&self, bucket: Bucket) -> Result<Option<T>> {
        let path = self.bucket_path(bucket);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(bucket = ?bucket, "bucket not present");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(bucket = ?bucket, error = %e, "bucket is malformed, treating as missing");
                Ok(None)
            }
        }
    }

    fn serialize_bucket<T: Serialize + ?Sized>(bucket: Bucket, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value)
            .map_err(|e| StartpageError::Storage(format!("failed to serialize {}: {e}", bucket.file_name())))
    }

    /// Writes a bucket atomically (temp file, then rename).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the write, or the rename fails.
    fn write_bucket<T: Serialize + ?Sized>(&self, bucket: Bucket, value: &T) -> Result<()> {
        let json = Self::serialize_bucket(bucket, value)?;
        write_atomic(&self.bucket_path(bucket), &json)?;
        tracing::debug!(bucket = ?bucket, bytes = json.len(), "bucket saved");
        Ok(())
    }

    /// Writes every staged bucket to its temporary file, then renames them.
    ///
    /// Nothing is renamed unless all temporary files were written; on failure
    /// the ones already written are removed again.
    fn write_buckets(&self, staged: &[(Bucket, String)]) -> Result<()> {
        let mut pending = Vec::with_capacity(staged.len());

        for (bucket, json) in staged {
            let path = self.bucket_path(*bucket);
            let tmp_path = path.with_extension("tmp");
            if let Err(e) = std::fs::write(&tmp_path, json) {
                tracing::warn!(bucket = ?bucket, error = %e, "staging failed, discarding staged buckets");
                for (tmp_path, _) in &pending {
                    let _ = std::fs::remove_file(tmp_path);
                }
                return Err(e.into());
            }
            pending.push((tmp_path, path));
        }

        for (tmp_path, path) in &pending {
            std::fs::rename(tmp_path, path)?;
        }
        tracing::debug!(buckets = staged.len(), "buckets saved");
        Ok(())
    }

    fn remove_bucket(&self, bucket: Bucket) -> Result<()> {
        match std::fs::remove_file(self.bucket_path(bucket)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Writes `contents` to `path` through a sibling temporary file.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or renamed.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, contents)?;

    tracing::trace!("renaming temporary file to final location");
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

impl Storage for JsonStorage {
    fn load(&self) -> Result<StoredBuckets> {
        let _span = tracing::debug_span!("json_load").entered();

        let buckets = StoredBuckets {
            settings: self.read_bucket(Bucket::Settings)?,
            bookmarks: self.read_bucket(Bucket::Bookmarks)?,
        };

        tracing::debug!(
            has_settings = buckets.settings.is_some(),
            bookmark_count = buckets.bookmarks.as_ref().map(Vec::len),
            "buckets loaded"
        );
        Ok(buckets)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        let _span = tracing::debug_span!("json_save_settings").entered();
        self.write_bucket(Bucket::Settings, settings)
    }

    fn save_bookmarks(&mut self, bookmarks: &[Bookmark]) -> Result<()> {
        let _span = tracing::debug_span!("json_save_bookmarks", count = bookmarks.len()).entered();
        self.write_bucket(Bucket::Bookmarks, bookmarks)
    }

    fn save_buckets(&mut self, settings: Option<&Settings>, bookmarks: Option<&[Bookmark]>) -> Result<()> {
        let _span = tracing::debug_span!("json_save_buckets").entered();

        let mut staged = Vec::with_capacity(2);
        if let Some(settings) = settings {
            staged.push((Bucket::Settings, Self::serialize_bucket(Bucket::Settings, settings)?));
        }
        if let Some(bookmarks) = bookmarks {
            staged.push((Bucket::Bookmarks, Self::serialize_bucket(Bucket::Bookmarks, bookmarks)?));
        }
        self.write_buckets(&staged)
    }

    fn clear_all(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_all").entered();

        self.remove_bucket(Bucket::Settings)?;
        self.remove_bucket(Bucket::Bookmarks)?;

        tracing::debug!("all buckets removed");
        Ok(())
    }

    fn bucket_path(&self, bucket: Bucket) -> PathBuf {
        self.dir.join(bucket.file_name())
    }
}
