//! Terminal UI rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → frame → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: frame assembly and output
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor, width, wrapping and highlight utilities
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use theme::Theme;
pub use viewmodel::{
    AlertInfo, ChipInfo, DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, MandalDetail,
    SearchBarInfo, TabInfo, UIViewModel,
};
