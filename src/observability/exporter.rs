//! Span exporter that appends OTLP/JSON batches to a rotating file.

use super::file_writer::RotatingFile;
use super::otlp;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::future::ready;
use std::path::PathBuf;

/// Instrumentation scope recorded on every batch.
pub const SCOPE_NAME: &str = "MandalGuide";

#[derive(Debug)]
struct OtlpFileExporter {
    file: RotatingFile,
    resource: Resource,
    shut_down: bool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.shut_down {
            return Box::pin(ready(Err(TraceError::from("trace exporter already shut down"))));
        }

        let document = otlp::encode_batch(&self.resource, SCOPE_NAME, &batch);
        let result = self
            .file
            .append_line(&document.to_string())
            .map_err(|e| TraceError::from(format!("{}: {e}", self.file.path().display())));
        Box::pin(ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Tracer provider exporting every finished span synchronously to `path`.
#[must_use]
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(path),
        resource: resource.clone(),
        shut_down: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
