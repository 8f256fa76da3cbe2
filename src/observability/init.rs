//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros through `tracing-opentelemetry` into the file
//! exporter.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to every exported span.
const SERVICE_NAME: &str = "Startpage";

/// File the spans are written to, inside the data directory.
pub const TRACE_FILE_NAME: &str = "startpage-trace.jsonl";

/// Initializes the tracing subscriber with file-based span export.
///
/// # Parameters
///
/// * `config` - Plugin configuration containing the `trace_level` option
///
/// # Trace Level Resolution
///
/// `config.trace_level` if set, otherwise `"info"`. Any `EnvFilter` directive
/// works, e.g. `"startpage=debug"`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Does nothing if the directory cannot be created
/// - Idempotent: only the first call in a process installs a subscriber
///
/// # Example
///
/// ```rust
/// use startpage::observability::init_tracing;
/// use startpage::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
