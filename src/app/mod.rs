//! Application layer: state, events and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the catalog, favorites
//! store and query engine. Data flows one way:
//!
//! ```text
//! Key press → Event → handle_event → AppState mutation → Actions → runtime
//!                ↑                         │
//!                │                 favorites observers
//!                │                         ↓
//!         command results           render request
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the handler
//! - [`handler`]: event processing
//! - [`modes`]: tabs, routes and input modes
//! - [`state`]: application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Route, SearchFocus, Tab};
pub use state::{Alert, AppState, Confirmation};
