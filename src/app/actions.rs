//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) only mutates [`AppState`](crate::app::AppState);
//! anything that touches the outside world comes back as an [`Action`] for the
//! plugin runtime to execute.

use crate::links::MapLink;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Opens a map or directions URL with the configured opener command.
    ///
    /// The result comes back as a command result; failures are turned into
    /// [`Event::LaunchFailed`](crate::app::Event::LaunchFailed).
    OpenUrl(MapLink),
}
