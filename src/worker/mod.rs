//! Background worker for storage and file operations.
//!
//! All disk I/O runs on Zellij's worker thread so the plugin's render loop
//! never blocks. The plugin posts a [`WorkerMessage`], the worker replies with
//! a [`WorkerResponse`], and the plugin applies it as an event.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::{init_worker_tracing, StartpageWorker};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
