//! Tabs, routes and input modes.
//!
//! The UI shows one of three tabs, or the detail screen of a single mandal
//! opened from a tab. Input is either normal (single-key commands) or search
//! (characters go into the query).
//!
//! ```
//! use mandalguide::app::modes::{InputMode, Route, SearchFocus, Tab};
//!
//! let route = Route::Details { mandal_id: "1".into(), back: Tab::Favorites };
//! assert_eq!(route.tab(), Tab::Favorites);
//! assert_eq!(InputMode::Search(SearchFocus::Typing), InputMode::Search(SearchFocus::Typing));
//! ```

use crate::domain::error::{MandalGuideError, Result};

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Typing into the search field. Every character key edits the query.
    Typing,
    /// Moving through results. j/k navigate, `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search(SearchFocus),
}

/// Top-level tabs of the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    /// Search mandals by name or area. Lists nothing until a query is typed.
    Search,
    /// Browse by area chip, optionally narrowed by text.
    Areas,
    /// Mandals marked as favorites.
    Favorites,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Search, Self::Areas, Self::Favorites];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Areas => "Areas",
            Self::Favorites => "Favorites",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Search => Self::Areas,
            Self::Areas => Self::Favorites,
            Self::Favorites => Self::Search,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Search => Self::Favorites,
            Self::Areas => Self::Search,
            Self::Favorites => Self::Areas,
        }
    }

    /// Parses the `start_tab` configuration value.
    ///
    /// # Errors
    ///
    /// Returns [`MandalGuideError::Config`] for anything but a tab name.
    pub fn from_config(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "search" | "map" => Ok(Self::Search),
            "areas" => Ok(Self::Areas),
            "favorites" | "favourites" => Ok(Self::Favorites),
            _ => Err(MandalGuideError::Config(format!(
                "unknown start_tab `{}`, expected search, areas or favorites",
                value.trim()
            ))),
        }
    }
}

/// Where the user currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Tab(Tab),
    /// Detail screen for `mandal_id`; going back returns to `back`.
    Details { mandal_id: String, back: Tab },
}

impl Route {
    /// The tab highlighted in the tab bar for this route.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        match self {
            Self::Tab(tab) | Self::Details { back: tab, .. } => *tab,
        }
    }

    #[must_use]
    pub const fn is_details(&self) -> bool {
        matches!(self, Self::Details { .. })
    }
}
