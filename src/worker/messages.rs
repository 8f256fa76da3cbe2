//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the plugin
//! thread and the background worker that owns storage. Requests carry a
//! [`TraceContext`] so worker spans join the plugin's trace.

use crate::storage::{Bucket, StartpageData};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid, which is the
    /// case whenever no OpenTelemetry layer is installed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use startpage::worker::TraceContext;
    ///
    /// if let Some(ctx) = TraceContext::from_current() {
    ///     println!("Trace ID: {}", ctx.trace_id);
    /// }
    /// ```
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id = format!("{:032x}", span_context.trace_id());
            let parent_span_id = format!("{:016x}", span_context.span_id());

            tracing::trace!(trace_id = %trace_id, parent_span_id = %parent_span_id, "capturing trace context");

            Some(Self {
                trace_id,
                parent_span_id,
            })
        } else {
            None
        }
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace
/// context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load(Load { seed_file: PathBuf }),
    export(Export { dir: PathBuf, seed_file: PathBuf }),
    import(Import { path: PathBuf, seed_file: PathBuf }),
    reset(Reset { seed_file: PathBuf }),
    prepare_edit(PrepareEdit { bucket: Bucket, seed_file: PathBuf }),
}

/// Messages sent from the plugin thread to the worker thread.
///
/// Every variant carries the seed file path because any operation may need to
/// fall back to it when storage is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load settings and bookmarks (storage → seed → defaults).
    Load {
        seed_file: PathBuf,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Write the effective data to a dated export file in `dir`.
    Export {
        dir: PathBuf,
        seed_file: PathBuf,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Validate the file at `path`, write its present parts, then reload.
    Import {
        path: PathBuf,
        seed_file: PathBuf,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove both buckets, then reload.
    Reset {
        seed_file: PathBuf,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Make sure a bucket file exists so it can be opened in an editor.
    PrepareEdit {
        bucket: Bucket,
        seed_file: PathBuf,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Load { trace_context, .. }
            | Self::Export { trace_context, .. }
            | Self::Import { trace_context, .. }
            | Self::Reset { trace_context, .. }
            | Self::PrepareEdit { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short operation name for spans and error messages.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::Export { .. } => "export",
            Self::Import { .. } => "import",
            Self::Reset { .. } => "reset",
            Self::PrepareEdit { .. } => "prepare edit",
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Result of a `Load`. Always sent, even when storage is unavailable.
    Loaded(StartpageData),

    /// The export file was written.
    Exported { path: PathBuf },

    /// Import succeeded; carries the reloaded data.
    Imported(StartpageData),

    /// Storage was cleared; carries the reloaded data.
    ResetDone(StartpageData),

    /// The bucket file exists at `path` and can be opened.
    EditReady { path: PathBuf },

    /// The operation failed; `message` is shown to the user.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_produce_matching_variants() {
        let seed = PathBuf::from("/data/data.json");
        let message = WorkerMessage::prepare_edit(Bucket::Bookmarks, seed.clone());
        assert!(matches!(
            message,
            WorkerMessage::PrepareEdit { bucket: Bucket::Bookmarks, ref seed_file, .. } if *seed_file == seed
        ));
        assert_eq!(message.operation(), "prepare edit");
    }

    #[test]
    fn no_trace_context_without_otel_layer() {
        let message = WorkerMessage::load(PathBuf::from("data.json"));
        assert!(message.trace_context().is_none());

        let json = serde_json::to_string(&message).expect("serialize");
        assert!(!json.contains("trace_context"));
    }

    #[test]
    fn messages_survive_the_json_hop() {
        let message = WorkerMessage::Import {
            path: PathBuf::from("/host/export.json"),
            seed_file: PathBuf::from("/host/data.json"),
            trace_context: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };
        let json = serde_json::to_string(&message).expect("serialize");
        let back: WorkerMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, message);
    }
}
