//! Sandbox filesystem helpers.

pub mod paths;

pub use paths::{config_path, expand_tilde, get_data_dir};
