//! Worker thread implementation for storage operations.
//!
//! [`StartpageWorker`] owns the storage backend and answers every
//! [`WorkerMessage`] with exactly one [`WorkerResponse`]. It never calls Zellij
//! host functions itself: the plugin binary wraps it in a `ZellijWorker` shim
//! that feeds it payloads and posts the replies.

use crate::domain::error::{Result, StartpageError};
use crate::infrastructure::paths;
use crate::storage::{
    load_startpage, read_import, write_export, Bucket, JsonStorage, StartpageData, Storage,
};
use crate::worker::{WorkerMessage, WorkerResponse};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Worker state for handling storage operations.
///
/// The storage backend is opened lazily on the first message, in the data
/// directory unless another one was given.
#[derive(Default)]
pub struct StartpageWorker {
    storage: Option<Box<dyn Storage>>,
    data_dir: Option<PathBuf>,
}

impl std::fmt::Debug for StartpageWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StartpageWorker")
            .field("storage_open", &self.storage.is_some())
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

impl StartpageWorker {
    /// Creates a worker whose storage lives in `data_dir`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use startpage::worker::{StartpageWorker, WorkerMessage, WorkerResponse};
    /// use std::path::PathBuf;
    ///
    /// let mut worker = StartpageWorker::new(PathBuf::from("/tmp/startpage"));
    /// let response = worker.handle_message(WorkerMessage::load(PathBuf::from("/tmp/data.json")));
    /// assert!(matches!(response, WorkerResponse::Loaded(_)));
    /// ```
    #[must_use]
    pub const fn new(data_dir: PathBuf) -> Self {
        Self {
            storage: None,
            data_dir: Some(data_dir),
        }
    }

    /// Creates a worker around an already open backend.
    #[must_use]
    pub fn with_storage(storage: Box<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
            data_dir: None,
        }
    }

    /// Returns the storage backend, opening it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created.
    fn storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        if self.storage.is_none() {
            let dir = self.data_dir.clone().unwrap_or_else(paths::get_data_dir);
            let storage = JsonStorage::new(dir)?;
            self.storage = Some(Box::new(storage));
        }

        self.storage
            .as_mut()
            .ok_or_else(|| StartpageError::Worker("Storage not initialized".to_string()))
    }

    /// Effective data. Storage problems degrade to the seed file or defaults.
    fn load(&mut self, seed_file: &Path) -> StartpageData {
        let storage = match self.storage() {
            Ok(storage) => Some(&**storage),
            Err(e) => {
                tracing::warn!(error = %e, "storage unavailable, loading without it");
                None
            }
        };
        load_startpage(storage, seed_file)
    }

    /// Standardizes error handling and success logging across operations.
    fn handle_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => Self::failure(operation, &e),
        }
    }

    fn failure(operation: &str, error: &StartpageError) -> WorkerResponse {
        tracing::debug!(operation = operation, error = %error, "worker operation failed");
        let message = match error {
            StartpageError::Import(_) => format!("Failed to {operation}: invalid file format"),
            other => format!("Failed to {operation}: {other}"),
        };
        WorkerResponse::Error { message }
    }

    fn handle_export(&mut self, dir: &Path, seed_file: &Path) -> WorkerResponse {
        let data = self.load(seed_file);
        Self::handle_result(
            "export",
            write_export(dir, &data, chrono::Utc::now()),
            |path| WorkerResponse::Exported { path },
        )
    }

    /// Validates the whole file before touching storage.
    fn handle_import(&mut self, path: &Path, seed_file: &Path) -> WorkerResponse {
        let result = read_import(path).and_then(|imported| {
            self.storage()?
                .save_buckets(imported.settings.as_ref(), imported.bookmarks.as_deref())?;
            tracing::debug!(
                settings = imported.settings.is_some(),
                bookmarks = imported.bookmarks.as_ref().map(Vec::len),
                "import written"
            );
            Ok(())
        });

        match result {
            Ok(()) => WorkerResponse::Imported(self.load(seed_file)),
            Err(e) => Self::failure("import", &e),
        }
    }

    fn handle_reset(&mut self, seed_file: &Path) -> WorkerResponse {
        match self.storage().and_then(|storage| storage.clear_all()) {
            Ok(()) => WorkerResponse::ResetDone(self.load(seed_file)),
            Err(e) => Self::failure("reset", &e),
        }
    }

    /// Writes the bucket from the effective data if it does not exist yet.
    fn handle_prepare_edit(&mut self, bucket: Bucket, seed_file: &Path) -> WorkerResponse {
        let path = match self.storage() {
            Ok(storage) => storage.bucket_path(bucket),
            Err(e) => return Self::failure("open editor", &e),
        };

        if path.exists() {
            return WorkerResponse::EditReady { path };
        }

        let data = self.load(seed_file);
        let result = self.storage().and_then(|storage| match bucket {
            Bucket::Settings => storage.save_settings(&data.settings),
            Bucket::Bookmarks => storage.save_bookmarks(&data.bookmarks),
        });

        Self::handle_result("open editor", result, |()| {
            tracing::debug!(bucket = ?bucket, path = ?path, "bucket materialized for editing");
            WorkerResponse::EditReady { path }
        })
    }

    /// Attaches the parent trace context carried by a message.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", operation = message.operation());
        let _guard = span.entered();

        match message {
            WorkerMessage::Load { seed_file, .. } => WorkerResponse::Loaded(self.load(&seed_file)),
            WorkerMessage::Export { dir, seed_file, .. } => self.handle_export(&dir, &seed_file),
            WorkerMessage::Import { path, seed_file, .. } => self.handle_import(&path, &seed_file),
            WorkerMessage::Reset { seed_file, .. } => self.handle_reset(&seed_file),
            WorkerMessage::PrepareEdit { bucket, seed_file, .. } => {
                self.handle_prepare_edit(bucket, &seed_file)
            }
        }
    }

    /// Decodes a JSON payload, handles it, and encodes the response.
    ///
    /// Returns `None` when the payload is not a `WorkerMessage` or the
    /// response cannot be serialized; both are logged.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = serde_json::from_str(payload)
            .map_err(|e| tracing::debug!(error = %e, "failed to deserialize worker message"))
            .ok()?;

        let response = self.handle_message(message);

        serde_json::to_string(&response)
            .map_err(|e| tracing::debug!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initializes tracing for the worker thread, once per worker lifetime.
///
/// Uses the default configuration: the worker does not see the plugin's
/// options, but it writes to the same trace file.
pub fn init_worker_tracing() {
    if WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        return;
    }
    crate::observability::init_tracing(&crate::Config::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bookmark, Settings};
    use crate::storage::DataSource;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        worker: StartpageWorker,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().expect("tempdir");
            let worker = StartpageWorker::new(dir.path().join("store"));
            Self { dir, worker }
        }

        fn seed(&self) -> PathBuf {
            self.dir.path().join("data.json")
        }
    }

    #[test]
    fn load_without_anything_gives_defaults() {
        let mut fx = Fixture::new();
        let seed = fx.seed();
        let response = fx.worker.handle_message(WorkerMessage::load(seed));
        assert_eq!(response, WorkerResponse::Loaded(StartpageData::defaults()));
    }

    #[test]
    fn prepare_edit_materializes_missing_bucket() {
        let mut fx = Fixture::new();
        std::fs::write(
            fx.seed(),
            r#"{"bookmarks":[{"name":"Seeded","url":"https://seed.example"}]}"#,
        )
        .expect("seed");

        let seed = fx.seed();
        let response = fx.worker.handle_message(WorkerMessage::prepare_edit(Bucket::Bookmarks, seed));
        let WorkerResponse::EditReady { path } = response else {
            panic!("expected EditReady, got {response:?}");
        };

        let written: Vec<Bookmark> =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(written[0].name, "Seeded");
    }

    #[test]
    fn import_then_reset_round_trip() {
        let mut fx = Fixture::new();
        let import_path = fx.dir.path().join("import.json");
        std::fs::write(
            &import_path,
            r#"{"config":{"searchEngine":"https://duckduckgo.com/?q="},"bookmarks":[{"name":"A","url":"https://a.io","tags":[]}]}"#,
        )
        .expect("write import");

        let seed = fx.seed();
        let response = fx.worker.handle_message(WorkerMessage::import(import_path, seed.clone()));
        let WorkerResponse::Imported(data) = response else {
            panic!("expected Imported, got {response:?}");
        };
        assert_eq!(data.source, DataSource::Storage);
        assert_eq!(data.settings.search_engine, "https://duckduckgo.com/?q=");

        let response = fx.worker.handle_message(WorkerMessage::reset(seed));
        assert_eq!(response, WorkerResponse::ResetDone(StartpageData::defaults()));
    }

    #[test]
    fn invalid_import_leaves_storage_untouched() {
        let mut fx = Fixture::new();
        let mut storage = JsonStorage::new(fx.dir.path().join("store")).expect("storage");
        storage.save_settings(&Settings::default()).expect("save");

        let import_path = fx.dir.path().join("bad.json");
        std::fs::write(&import_path, r#"{"bookmarks": "nope"}"#).expect("write");

        let seed = fx.seed();
        let response = fx.worker.handle_message(WorkerMessage::import(import_path, seed));
        assert_eq!(
            response,
            WorkerResponse::Error {
                message: "Failed to import: invalid file format".to_string()
            }
        );
        assert!(storage.load().expect("load").bookmarks.is_none());
    }

    #[test]
    fn failed_import_write_applies_nothing() {
        let mut fx = Fixture::new();
        let store = fx.dir.path().join("store");
        std::fs::create_dir_all(store.join("bookmarks.tmp")).expect("block bookmarks bucket");

        let import_path = fx.dir.path().join("import.json");
        std::fs::write(
            &import_path,
            r#"{"config":{"searchEngine":"https://duckduckgo.com/?q="},"bookmarks":[{"name":"A","url":"https://a.io"}]}"#,
        )
        .expect("write import");

        let seed = fx.seed();
        let response = fx.worker.handle_message(WorkerMessage::import(import_path, seed));
        assert!(matches!(response, WorkerResponse::Error { .. }), "got {response:?}");

        let stored = JsonStorage::new(store).expect("storage").load().expect("load");
        assert!(stored.settings.is_none());
        assert!(stored.bookmarks.is_none());
    }

    #[test]
    fn export_writes_dated_file() {
        let mut fx = Fixture::new();
        let out = fx.dir.path().join("exports");
        let seed = fx.seed();

        let response = fx.worker.handle_message(WorkerMessage::export(out.clone(), seed));
        let WorkerResponse::Exported { path } = response else {
            panic!("expected Exported, got {response:?}");
        };
        assert!(path.starts_with(&out));
        assert!(path.exists());
    }

    #[test]
    fn garbage_payload_is_dropped() {
        let mut fx = Fixture::new();
        assert!(fx.worker.handle_payload("not a message").is_none());

        let payload = serde_json::to_string(&WorkerMessage::load(fx.seed())).expect("serialize");
        let reply = fx.worker.handle_payload(&payload).expect("reply");
        assert!(reply.contains("Loaded"));
    }
}
