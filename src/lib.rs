//! Mandal Guide: a Zellij plugin for finding Ganeshotsav mandals.
//!
//! Browse a catalog of festival pavilions ("mandals") from a floating pane:
//! search by name or area, narrow by area chip, open a detail screen, keep a
//! favorites list for the session and hand map or directions links to the
//! system opener.
//!
//! # Architecture
//!
//! - **`catalog`**: the immutable list of mandals (embedded or from a file)
//! - **`store`**: the favorites set with change subscriptions
//! - **`query`**: the filter shared by every listing screen
//! - **`links`**: map / directions URL building and launch outcomes
//! - **`app`**: state, event handling and actions
//! - **`ui`**: view models, components and themes
//! - **`observability`**: OpenTelemetry trace export to a file
//! - **`infrastructure`**: sandbox path helpers
//!
//! # Configuration
//!
//! ```kdl
//! plugin location="file:~/.config/zellij/plugins/mandalguide.wasm" {
//!     theme "saffron"
//!     start_tab "areas"
//!     catalog_file "~/mandals.toml"
//!     open_command "xdg-open"
//!     trace_level "debug"
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use mandalguide::{handle_event, initialize, Config, Event};
//! use std::collections::BTreeMap;
//!
//! let options = BTreeMap::from([("start_tab".to_string(), "favorites".to_string())]);
//! let mut state = initialize(&Config::from_zellij(&options));
//! handle_event(&mut state, &Event::NextTab)?;
//! # Ok::<(), mandalguide::MandalGuideError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod links;
pub mod observability;
pub mod query;
pub mod store;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, Route, SearchFocus, Tab};
pub use catalog::{AreaSummary, Catalog};
pub use domain::{CrowdLevel, Mandal, MandalGuideError, Result};
pub use query::{AreaFilter, EmptyQuery, Query, SearchOutcome};
pub use store::{FavoriteSet, FavoritesStore, SubscriptionId};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Opener used when `open_command` is not set.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration parsed from the Zellij layout.
///
/// Unknown keys are ignored and unparsable values fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Built-in theme name. Ignored when `theme_file` is set.
    pub theme: String,

    /// Custom theme TOML.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub trace_level: String,

    /// Catalog to load instead of the embedded one (`.json` or `.toml`).
    pub catalog_file: Option<PathBuf>,

    /// Program that opens map URLs.
    pub open_command: String,

    /// Tab shown when the plugin opens.
    pub start_tab: Tab,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ui::theme::DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: "info".to_string(),
            catalog_file: None,
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            start_tab: Tab::Search,
        }
    }
}

impl Config {
    /// Reads the plugin options Zellij passes to `load`.
    #[must_use]
    pub fn from_zellij(options: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            options
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            theme: text("theme").unwrap_or(defaults.theme),
            theme_file: options.get("theme_file").and_then(|v| infrastructure::config_path(v)),
            trace_level: text("trace_level").unwrap_or(defaults.trace_level),
            catalog_file: options.get("catalog_file").and_then(|v| infrastructure::config_path(v)),
            open_command: text("open_command").unwrap_or(defaults.open_command),
            start_tab: text("start_tab").map_or(defaults.start_tab, |v| {
                Tab::from_config(&v).unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "ignoring start_tab");
                    defaults.start_tab
                })
            }),
        }
    }
}

/// Builds the initial application state from configuration.
///
/// Theme and catalog load failures are logged and replaced by the built-in
/// defaults, so the plugin always opens.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize", start_tab = ?config.start_tab).entered();

    let mut state = AppState::new(load_catalog(config), load_theme(config));
    if config.start_tab != Tab::Search {
        state.show_tab(config.start_tab);
    }

    tracing::debug!(
        mandals = state.catalog.len(),
        areas = state.areas.len(),
        theme = %state.theme.name,
        "app state initialized"
    );
    state
}

fn load_theme(config: &Config) -> Theme {
    if let Some(path) = &config.theme_file {
        return Theme::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %path.display(), error = %e, "failed to load theme file, using default");
            Theme::default()
        });
    }

    Theme::from_name(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        Theme::default()
    })
}

fn load_catalog(config: &Config) -> Catalog {
    let Some(path) = &config.catalog_file else {
        return Catalog::builtin();
    };

    Catalog::from_file(path).unwrap_or_else(|e| {
        tracing::warn!(catalog_file = %path.display(), error = %e, "failed to load catalog, using built-in data");
        Catalog::builtin()
    })
}
