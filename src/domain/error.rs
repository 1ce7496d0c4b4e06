//! Error types for the mandal guide.
//!
//! [`MandalGuideError`] covers the load-time failures of the plugin: reading
//! a catalog or theme file, parsing it, and starting the external URL opener.
//! The favorites store and the query engine never produce errors.

use thiserror::Error;

/// The main error type for mandal guide operations.
///
/// Variants that wrap errors from other crates use `#[from]` so loaders can
/// propagate them with `?`.
///
/// # Examples
///
/// ```
/// use mandalguide::MandalGuideError;
///
/// fn reject_catalog() -> Result<(), MandalGuideError> {
///     Err(MandalGuideError::Catalog("duplicate mandal id `7`".to_string()))
/// }
///
/// assert!(reject_catalog().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MandalGuideError {
    /// Catalog data is malformed or violates a catalog invariant
    /// (empty or duplicate ids, unknown file format).
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON catalog could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external map/navigation opener could not be started.
    #[error("Launch error: {0}")]
    Launch(String),
}

/// A specialized `Result` type for mandal guide operations.
pub type Result<T> = std::result::Result<T, MandalGuideError>;
