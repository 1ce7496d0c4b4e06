//! Tracing export to an OTLP/JSON file.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK TracerProvider
//!              → OtlpFileExporter → ~/.local/share/zellij/mandalguide/mandalguide-otlp.json
//! ```
//!
//! The file holds one OTLP/JSON document per line and rotates at 10 MB,
//! keeping 3 numbered backups. Verbosity comes from `RUST_LOG`, else the
//! `trace_level` plugin option, else `info`.

mod exporter;
mod file_writer;
mod init;
mod otlp;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, TRACE_FILE_NAME};
