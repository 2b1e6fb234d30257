use opentelemetry::global;
use opentelemetry_sdk::{trace::SdkTracerProvider, Resource};

use crate::config::{TelemetryConfig, TraceExporter};

/// Installs the global tracer provider selected by configuration.
///
/// Returns the provider so the caller can flush it on shutdown. With
/// `TraceExporter::None` nothing is installed and the global no-op tracer
/// stays in effect, so spans cost next to nothing.
pub fn init_tracer_provider(config: &TelemetryConfig) -> Option<SdkTracerProvider> {
    // ---
    match config.exporter {
        TraceExporter::None => None,
        TraceExporter::Stdout => {
            let resource = Resource::builder()
                .with_service_name(config.service_name.clone())
                .build();

            let provider = SdkTracerProvider::builder()
                .with_resource(resource)
                .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
                .build();
            global::set_tracer_provider(provider.clone());

            tracing::info!(service = %config.service_name, "Installed stdout span exporter");
            Some(provider)
        }
    }
}
