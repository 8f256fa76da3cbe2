//! File-based OpenTelemetry span exporter.
//!
//! Spans are written one JSON object per line instead of being sent over the
//! network, which is all a sandboxed plugin can do. Each line carries the
//! service name, ids, timing, attributes, events, and status of one span.

use super::rotation::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

struct FileSpanExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        Self {
            file: RotatingFile::new(file_path),
            service: service_name(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = batch
            .iter()
            .map(|span| span_to_json(span, &self.service).to_string())
            .try_for_each(|line| self.file.write_line(&line))
            .map_err(|e| TraceError::from(e.to_string()));

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        self.service = service_name(res);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a tracer provider that exports every finished span to `file_path`.
///
/// Uses the simple (unbatched) export strategy: the plugin has no async
/// runtime to drive a batch processor.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn service_name(resource: &Resource) -> String {
    resource
        .iter()
        .find(|(key, _)| key.as_str() == "service.name")
        .map_or_else(|| "unknown".to_string(), |(_, value)| value.to_string())
}

fn span_to_json(span: &SpanData, service: &str) -> JsonValue {
    let duration = span
        .end_time
        .duration_since(span.start_time)
        .unwrap_or_default();

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "timeUnixNano": unix_nanos(event.timestamp),
                "attributes": attributes_to_json(&event.attributes),
            })
        })
        .collect();

    json!({
        "service": service,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        "name": span.name,
        "startTimeUnixNano": unix_nanos(span.start_time),
        "durationMicros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        "attributes": attributes_to_json(&span.attributes),
        "events": events,
        "status": match &span.status {
            Status::Unset => JsonValue::Null,
            Status::Ok => json!("ok"),
            Status::Error { description } => json!({ "error": description.to_string() }),
        },
    })
}

fn attributes_to_json(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value_to_json(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}
