//! Telemetry setup for OpenTelemetry integration

use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Boxed layer slotted into the subscriber stack
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// What happened while building the OpenTelemetry layer, reported once logging is up
#[derive(Debug)]
pub enum TelemetryStatus {
    NotConfigured,
    Enabled { endpoint: String },
    FeatureDisabled,
    Failed(String),
}

impl TelemetryStatus {
    pub fn log(&self) {
        match self {
            TelemetryStatus::NotConfigured => {
                tracing::debug!("OpenTelemetry not configured (OTEL_EXPORTER_OTLP_ENDPOINT not set)")
            }
            TelemetryStatus::Enabled { endpoint } => {
                tracing::info!(endpoint = %endpoint, "OpenTelemetry initialized successfully")
            }
            TelemetryStatus::FeatureDisabled => {
                tracing::warn!("OpenTelemetry endpoint set but feature 'telemetry' not enabled");
                tracing::warn!("Rebuild with: cargo build --features telemetry");
            }
            TelemetryStatus::Failed(e) => {
                tracing::warn!(error = %e, "Failed to initialize OpenTelemetry (continuing without it)")
            }
        }
    }
}

/// Build the OpenTelemetry layer if enabled
///
/// # Environment Variables
///
/// - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP/HTTP endpoint (e.g., http://localhost:4318)
/// - `OTEL_SERVICE_NAME`: Service name (default: gembird-bridge)
pub fn otel_layer<S>() -> (Option<BoxedLayer<S>>, TelemetryStatus)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let endpoint = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(endpoint) => endpoint,
        Err(_) => return (None, TelemetryStatus::NotConfigured),
    };

    #[cfg(feature = "telemetry")]
    {
        match otel_layer_impl::<S>(&endpoint) {
            Ok(layer) => (Some(layer), TelemetryStatus::Enabled { endpoint }),
            Err(e) => (None, TelemetryStatus::Failed(e.to_string())),
        }
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = endpoint;
        (None, TelemetryStatus::FeatureDisabled)
    }
}

#[cfg(feature = "telemetry")]
fn otel_layer_impl<S>(endpoint: &str) -> anyhow::Result<BoxedLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::TracerProvider;
    use opentelemetry_sdk::Resource;

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "gembird-bridge".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(Resource::new(vec![KeyValue::new(
            "service.name",
            service_name.clone(),
        )]))
        .build();

    let tracer = provider.tracer(service_name);
    opentelemetry::global::set_tracer_provider(provider);

    Ok(tracing_opentelemetry::layer().with_tracer(tracer).boxed())
}

/// Flush pending spans before exit
pub fn shutdown() {
    #[cfg(feature = "telemetry")]
    opentelemetry::global::shutdown_tracer_provider();
}
