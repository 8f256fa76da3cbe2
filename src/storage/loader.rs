//! Startup data loading with fallbacks.
//!
//! Order of preference:
//!
//! 1. Both storage buckets present: use them.
//! 2. Otherwise the seed file (`data.json`), with missing halves filled by
//!    defaults.
//! 3. Otherwise built-in defaults.
//!
//! Loading never fails. Each fallback is logged.

use crate::domain::Settings;
use crate::storage::backend::Storage;
use crate::storage::models::{DataSource, SeedDocument, StartpageData};
use std::path::Path;

/// Loads the effective settings and bookmarks.
///
/// # Parameters
///
/// * `storage` - Bucket storage, or `None` when it could not be opened
/// * `seed_file` - Path to the seed document
///
/// # Example
///
/// ```no_run
/// use startpage::storage::{load_startpage, JsonStorage, Storage};
/// use std::path::{Path, PathBuf};
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/startpage"))?;
/// let data = load_startpage(Some(&storage as &dyn Storage), Path::new("/tmp/startpage/data.json"));
/// println!("{} bookmarks from {:?}", data.bookmarks.len(), data.source);
/// # Ok::<(), startpage::StartpageError>(())
/// ```
#[must_use]
pub fn load_startpage(storage: Option<&dyn Storage>, seed_file: &Path) -> StartpageData {
    let _span = tracing::debug_span!("load_startpage", seed_file = ?seed_file).entered();

    if let Some(storage) = storage {
        match storage.load() {
            Ok(buckets) => {
                if let Some((settings, bookmarks)) = buckets.into_complete() {
                    tracing::debug!(bookmark_count = bookmarks.len(), "loaded from storage");
                    return StartpageData {
                        settings,
                        bookmarks,
                        source: DataSource::Storage,
                    };
                }
                tracing::debug!("storage incomplete, trying seed file");
            }
            Err(e) => {
                tracing::warn!(error = %e, "storage read failed, trying seed file");
            }
        }
    }

    match read_seed(seed_file) {
        Some(seed) => {
            let bookmarks = seed.bookmarks.unwrap_or_default();
            tracing::debug!(bookmark_count = bookmarks.len(), "loaded from seed file");
            StartpageData {
                settings: seed.config.unwrap_or_else(Settings::default),
                bookmarks,
                source: DataSource::Seed,
            }
        }
        None => {
            tracing::debug!("using built-in defaults");
            StartpageData::defaults()
        }
    }
}

fn read_seed(path: &Path) -> Option<SeedDocument> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| tracing::debug!(error = %e, "seed file not readable"))
        .ok()?;

    serde_json::from_str(&contents)
        .map_err(|e| tracing::warn!(error = %e, "seed file is malformed"))
        .ok()
}
