//! Storage layer for settings and bookmarks.
//!
//! Persists the two buckets as JSON files, loads them with seed/default
//! fallbacks, and reads and writes export documents. Everything here runs on
//! the worker thread.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `loader`: Storage → seed file → defaults fallback chain
//! - `models`: On-disk document shapes and load results
//! - `transfer`: Export and import documents

pub mod backend;
pub mod json;
pub mod loader;
pub mod models;
pub mod transfer;

pub use backend::{Bucket, Storage, StoredBuckets};
pub use json::JsonStorage;
pub use loader::load_startpage;
pub use models::{DataSource, ExportDocument, ImportedData, SeedDocument, StartpageData};
pub use transfer::{build_export, export_file_name, parse_import, read_import, write_export};
