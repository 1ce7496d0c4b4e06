//! Domain layer for the mandal guide.
//!
//! Core types independent of Zellij APIs: the [`Mandal`] record and the
//! crate-wide error type.
//!
//! - [`error`]: Error types and result aliases
//! - [`mandal`]: Mandal record, crowd levels and contact details

pub mod error;
pub mod mandal;

pub use error::{MandalGuideError, Result};
pub use mandal::{ContactInfo, CrowdLevel, Mandal};
