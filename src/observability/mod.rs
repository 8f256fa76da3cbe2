//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: one JSON object per span in
//!   `~/.local/share/zellij/startpage/startpage-trace.jsonl`
//! - **Automatic Rotation**: the file rotates at 5 MiB, keeping 3 numbered backups
//! - **Cross-Thread Traces**: worker spans join the plugin's trace through
//!   [`TraceContext`](crate::worker::TraceContext)
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `exporter`: Span exporter and tracer provider
//! - `rotation`: Rotating line writer

mod exporter;
mod init;
mod rotation;

pub use init::{init_tracing, TRACE_FILE_NAME};
