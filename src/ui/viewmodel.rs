//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel` and consumed by
//! the renderer. They hold display-ready strings, flags and highlight ranges,
//! never catalog references or business logic.

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Tab bar entries in display order.
    pub tabs: Vec<TabInfo>,

    /// Area chips, present on the areas tab only.
    pub area_chips: Option<Vec<ChipInfo>>,

    /// Search box, present when the current screen shows one.
    pub search_bar: Option<SearchBarInfo>,

    /// Visible window of list rows.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Detail screen content; replaces the list when present.
    pub detail: Option<DetailView>,

    /// Detail lines scrolled past, already clamped to the pane.
    pub detail_scroll: usize,

    /// Message shown instead of an empty list.
    pub empty_state: Option<EmptyState>,

    /// Alert or confirmation drawn over everything else.
    pub alert: Option<AlertInfo>,

    pub footer: FooterInfo,
}

/// One row of the mandal list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,

    /// `"{area} • {distance}"`.
    pub location: String,

    /// Crowd level label, e.g. `"Very High"`.
    pub crowd: String,

    pub is_selected: bool,

    pub is_favorite: bool,

    /// Char ranges of `name` matching the current query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub title: String,
    pub is_active: bool,
}

/// An area chip with its mandal count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInfo {
    pub label: String,
    pub count: usize,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Keys go into the query (typing focus).
    pub is_focused: bool,
}

/// Detail screen for a single mandal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Found(Box<MandalDetail>),
    /// The route named an id the catalog does not contain.
    NotFound { mandal_id: String },
}

/// Display fields of the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandalDetail {
    pub name: String,
    pub location: String,
    pub established: String,
    pub crowd: String,
    pub visiting_hours: String,
    pub address: String,
    pub phone: Option<String>,
    pub special_features: Vec<String>,
    pub about: String,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Modal box content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInfo {
    pub title: String,
    pub message: String,
    /// Key hints shown under the message.
    pub buttons: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,

    /// Transient message, cleared on the next key press.
    pub status: Option<String>,
}
