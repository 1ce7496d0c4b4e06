//! Application state and view model computation.
//!
//! [`AppState`] owns the catalog, the favorites store and every piece of
//! transient UI state (route, query, area chip, selection, alerts). It is the
//! only place that runs the query engine for the screens: each tab calls
//! [`query::search`] or [`query::favorites`] and the result is cached in
//! `filtered_mandals` until the next change.
//!
//! # Favorites notification
//!
//! On construction the state subscribes a render signal to its
//! [`FavoritesStore`]. Every toggle, wherever it comes from, raises the signal;
//! the event handler then recomputes the visible rows and asks for a render,
//! so list markers, the favorites tab and the detail header all agree.
//!
//! # Example
//!
//! ```
//! use mandalguide::app::AppState;
//! use mandalguide::catalog::Catalog;
//! use mandalguide::ui::Theme;
//!
//! let mut state = AppState::new(Catalog::builtin(), Theme::default());
//! state.search_query = "raja".to_string();
//! state.apply_filters();
//! assert!(!state.filtered_mandals.is_empty());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.tabs.len(), 3);
//! ```

use super::modes::{InputMode, Route, SearchFocus, Tab};
use crate::catalog::{AreaSummary, Catalog};
use crate::domain::Mandal;
use crate::query::{self, AreaFilter, EmptyQuery, Query};
use crate::store::FavoritesStore;
use crate::ui::components;
use crate::ui::helpers::fit;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AlertInfo, ChipInfo, DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo,
    MandalDetail, SearchBarInfo, TabInfo, UIViewModel,
};
use chrono::Datelike;
use std::cell::Cell;
use std::rc::Rc;

/// Rows used by chrome in every layout: blank, title, subtitle, tab bar,
/// border, table header, footer border, footer.
const BASE_CHROME_ROWS: usize = 8;

/// Rows added by the area chip bar.
const CHIP_BAR_ROWS: usize = 1;

/// Rows added by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// A blocking message the user must dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A pending yes/no question. Only favorite removal asks one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub mandal_id: String,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Immutable catalog loaded at startup.
    pub catalog: Catalog,

    /// Favorite ids shared by every screen.
    pub favorites: FavoritesStore,

    /// Area summaries for the chip bar, computed once from the catalog.
    pub areas: Vec<AreaSummary>,

    /// Current tab or detail screen.
    pub route: Route,

    pub input_mode: InputMode,

    /// Text typed into the search box of the current tab.
    pub search_query: String,

    /// Selected area chip. `0` is "All", `n` is `areas[n - 1]`.
    pub area_index: usize,

    /// Rows of the current tab, in catalog order.
    ///
    /// Recomputed by [`apply_filters`](Self::apply_filters).
    pub filtered_mandals: Vec<Mandal>,

    /// Non-blank query with zero results on the current tab.
    pub no_matches: bool,

    /// Zero-based selection within `filtered_mandals`.
    pub selected_index: usize,

    /// Blocking alert, if any.
    pub alert: Option<Alert>,

    /// Pending confirmation, if any.
    pub confirmation: Option<Confirmation>,

    /// One-line message shown in the footer until the next key press.
    pub status: Option<String>,

    pub theme: Theme,

    /// Year used for "years active" on the detail screen.
    pub current_year: i32,

    /// Detail lines scrolled past. Reset whenever a detail screen opens.
    pub detail_scroll: usize,

    /// Pane size of the last frame, `(rows, cols)`.
    viewport: (usize, usize),

    render_requested: Rc<Cell<bool>>,
}

impl AppState {
    /// Creates the state on the search tab with an empty favorites store.
    #[must_use]
    pub fn new(catalog: Catalog, theme: Theme) -> Self {
        let render_requested = Rc::new(Cell::new(false));
        let mut favorites = FavoritesStore::new();
        let signal = Rc::clone(&render_requested);
        favorites.subscribe(move |_| signal.set(true));

        let areas = catalog.areas();

        let mut state = Self {
            catalog,
            favorites,
            areas,
            route: Route::Tab(Tab::Search),
            input_mode: InputMode::Normal,
            search_query: String::new(),
            area_index: 0,
            filtered_mandals: Vec::new(),
            no_matches: false,
            selected_index: 0,
            alert: None,
            confirmation: None,
            status: None,
            theme,
            current_year: chrono::Local::now().year(),
            detail_scroll: 0,
            viewport: (0, 0),
            render_requested,
        };
        state.apply_filters();
        state
    }

    /// Records the pane size so detail scrolling can stop at the last line.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    /// Opens the detail screen for `mandal_id` at its top.
    pub fn open_details(&mut self, mandal_id: String, back: Tab) {
        self.route = Route::Details { mandal_id, back };
        self.detail_scroll = 0;
    }

    /// Furthest the detail screen can scroll in a `rows` x `cols` pane.
    #[must_use]
    pub fn max_detail_scroll(&self, rows: usize, cols: usize) -> usize {
        let Route::Details { mandal_id, .. } = &self.route else {
            return 0;
        };
        let lines = components::detail_line_count(&self.compute_detail(mandal_id), cols);
        lines.saturating_sub(components::detail_body_rows(rows))
    }

    /// Scrolls the detail screen one line down. Returns whether it moved.
    pub fn scroll_detail_down(&mut self) -> bool {
        let (rows, cols) = self.viewport;
        if self.detail_scroll >= self.max_detail_scroll(rows, cols) {
            return false;
        }
        self.detail_scroll += 1;
        true
    }

    /// Scrolls the detail screen one line up. Returns whether it moved.
    pub fn scroll_detail_up(&mut self) -> bool {
        let (rows, cols) = self.viewport;
        let current = self.detail_scroll.min(self.max_detail_scroll(rows, cols));
        if current == 0 {
            self.detail_scroll = 0;
            return false;
        }
        self.detail_scroll = current - 1;
        true
    }

    /// Takes and clears the render request raised by favorites observers.
    pub fn take_render_request(&self) -> bool {
        self.render_requested.replace(false)
    }

    /// Tab of the current route.
    #[must_use]
    pub const fn current_tab(&self) -> Tab {
        self.route.tab()
    }

    /// Switches to `tab`, leaving search mode and clearing the query.
    pub fn show_tab(&mut self, tab: Tab) {
        tracing::debug!(tab = ?tab, "switching tab");
        self.route = Route::Tab(tab);
        self.input_mode = InputMode::Normal;
        self.search_query.clear();
        self.selected_index = 0;
        self.apply_filters();
    }

    /// Whether the current screen accepts a text query.
    #[must_use]
    pub const fn supports_search(&self) -> bool {
        matches!(self.route, Route::Tab(Tab::Search | Tab::Areas))
    }

    /// Area filter for the selected chip.
    #[must_use]
    pub fn area_filter(&self) -> AreaFilter {
        match self.area_index.checked_sub(1).and_then(|i| self.areas.get(i)) {
            Some(area) => AreaFilter::Only(area.name.clone()),
            None => AreaFilter::All,
        }
    }

    /// Moves the area chip by `delta`, wrapping around "All".
    pub fn cycle_area(&mut self, forward: bool) {
        let chips = self.areas.len() + 1;
        self.area_index = if forward {
            (self.area_index + 1) % chips
        } else {
            (self.area_index + chips - 1) % chips
        };
        self.selected_index = 0;
        tracing::debug!(area = %self.area_filter().label(), "area chip changed");
        self.apply_filters();
    }

    pub fn move_selection_down(&mut self) {
        if self.filtered_mandals.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_mandals.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.filtered_mandals.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_mandals.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// The mandal actions apply to: the open detail, else the selected row.
    ///
    /// `None` on an empty list or when the detail id is not in the catalog.
    #[must_use]
    pub fn focused_mandal(&self) -> Option<&Mandal> {
        match &self.route {
            Route::Details { mandal_id, .. } => self.catalog.get(mandal_id),
            Route::Tab(_) => self.filtered_mandals.get(self.selected_index),
        }
    }

    /// Recomputes the rows of the current tab through the query engine.
    ///
    /// Clamps the selection. Leaves rows untouched on the detail screen.
    pub fn apply_filters(&mut self) {
        let Route::Tab(tab) = self.route else {
            return;
        };

        let _span = tracing::debug_span!(
            "apply_filters",
            tab = ?tab,
            catalog_len = self.catalog.len(),
            query_len = self.search_query.len(),
            favorites = self.favorites.len()
        )
        .entered();

        let mandals = self.catalog.mandals();
        let (rows, no_matches) = match tab {
            Tab::Search => {
                let outcome = query::search(
                    mandals,
                    &Query::text(self.search_query.clone()),
                    EmptyQuery::ShowNothing,
                );
                (outcome.results, outcome.no_matches)
            }
            Tab::Areas => {
                let outcome = query::search(
                    mandals,
                    &Query::new(self.search_query.clone(), self.area_filter()),
                    EmptyQuery::ShowAll,
                );
                (outcome.results, outcome.no_matches)
            }
            Tab::Favorites => (query::favorites(mandals, self.favorites.get_all()), false),
        };

        self.filtered_mandals = rows.into_iter().cloned().collect();
        self.no_matches = no_matches;

        if self.filtered_mandals.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_mandals.len() - 1);
        }

        tracing::debug!(
            visible = self.filtered_mandals.len(),
            no_matches = self.no_matches,
            "filters applied"
        );
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let detail = match &self.route {
            Route::Details { mandal_id, .. } => Some(self.compute_detail(mandal_id)),
            Route::Tab(_) => None,
        };

        let (display_items, selected_index) = if detail.is_some() {
            (Vec::new(), 0)
        } else {
            self.compute_display_window(rows, cols)
        };

        UIViewModel {
            header: self.compute_header(),
            tabs: self.compute_tabs(),
            area_chips: self.compute_area_chips(),
            search_bar: self.compute_search_bar(),
            empty_state: if detail.is_none() { self.compute_empty_state() } else { None },
            display_items,
            selected_index,
            detail_scroll: if detail.is_some() {
                self.detail_scroll.min(self.max_detail_scroll(rows, cols))
            } else {
                0
            },
            detail,
            alert: self.compute_alert(),
            footer: self.compute_footer(),
        }
    }

    /// Slices the visible window of rows around the selection.
    fn compute_display_window(&self, rows: usize, cols: usize) -> (Vec<DisplayItem>, usize) {
        if self.filtered_mandals.is_empty() {
            return (Vec::new(), 0);
        }

        let available_rows = self.calculate_available_rows(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_mandals.len());
        if visible_end - visible_start < available_rows && self.filtered_mandals.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let highlight = !self.search_query.trim().is_empty();
        let items = self.filtered_mandals[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, mandal)| {
                self.compute_display_item(mandal, visible_start + offset, cols, highlight)
            })
            .collect();

        (items, self.selected_index.saturating_sub(visible_start))
    }

    fn compute_display_item(&self, mandal: &Mandal, absolute_idx: usize, cols: usize, highlight: bool) -> DisplayItem {
        const NAME_COLUMN_WIDTH: usize = 36;

        let name = fit(&mandal.name, (NAME_COLUMN_WIDTH - 2).min(cols.saturating_sub(2)));

        let highlight_ranges = if highlight {
            query::match_ranges(&name, &self.search_query)
        } else {
            Vec::new()
        };

        DisplayItem {
            name,
            location: mandal.location_line(),
            crowd: mandal.crowd_level.label().to_string(),
            is_selected: absolute_idx == self.selected_index,
            is_favorite: self.favorites.is_favorite(&mandal.id),
            highlight_ranges,
        }
    }

    fn compute_detail(&self, mandal_id: &str) -> DetailView {
        self.catalog.get(mandal_id).map_or_else(
            || DetailView::NotFound {
                mandal_id: mandal_id.to_string(),
            },
            |mandal| {
                DetailView::Found(Box::new(MandalDetail {
                    name: mandal.name.clone(),
                    location: mandal.location_line(),
                    established: format!("Established in {}", mandal.established_year),
                    crowd: format!("{} Crowd", mandal.crowd_level),
                    visiting_hours: mandal.visiting_hours.clone(),
                    address: mandal.address.clone(),
                    phone: mandal.contact_info.phone.clone(),
                    special_features: mandal.special_features.clone(),
                    about: mandal.about(self.current_year),
                    is_favorite: self.favorites.is_favorite(&mandal.id),
                }))
            },
        )
    }

    fn compute_header(&self) -> HeaderInfo {
        let subtitle = match &self.route {
            Route::Details { .. } => "Mandal Details".to_string(),
            Route::Tab(Tab::Search) => format!("{} Mandals Available", self.catalog.len()),
            Route::Tab(Tab::Areas) => match self.area_filter() {
                AreaFilter::All => format!("{} mandals total", self.filtered_mandals.len()),
                AreaFilter::Only(area) => format!("{} mandals in {area}", self.filtered_mandals.len()),
            },
            Route::Tab(Tab::Favorites) => format!("{} saved mandals", self.filtered_mandals.len()),
        };

        HeaderInfo {
            title: " Ganpati Mandal Guide ".to_string(),
            subtitle,
        }
    }

    fn compute_tabs(&self) -> Vec<TabInfo> {
        let active = self.current_tab();
        Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| TabInfo {
                title: format!("{} {}", i + 1, tab.title()),
                is_active: *tab == active,
            })
            .collect()
    }

    fn compute_area_chips(&self) -> Option<Vec<ChipInfo>> {
        if self.route != Route::Tab(Tab::Areas) {
            return None;
        }

        let all = ChipInfo {
            label: query::ALL_AREAS.to_string(),
            count: self.catalog.len(),
            is_selected: self.area_index == 0,
        };
        let chips = std::iter::once(all)
            .chain(self.areas.iter().enumerate().map(|(i, area)| ChipInfo {
                label: area.name.clone(),
                count: area.count,
                is_selected: self.area_index == i + 1,
            }))
            .collect();
        Some(chips)
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let visible = match self.route {
            Route::Tab(Tab::Search) => true,
            Route::Tab(Tab::Areas) => matches!(self.input_mode, InputMode::Search(_)),
            _ => false,
        };

        visible.then(|| SearchBarInfo {
            query: self.search_query.clone(),
            is_focused: self.input_mode == InputMode::Search(SearchFocus::Typing),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered_mandals.is_empty() {
            return None;
        }

        let (message, subtitle) = if self.no_matches {
            (
                format!("No mandals match \"{}\"", self.search_query),
                "Try a different name or area".to_string(),
            )
        } else {
            match self.current_tab() {
                Tab::Search => (
                    "Type to search mandals".to_string(),
                    "Press / and enter a mandal name or area".to_string(),
                ),
                Tab::Areas => (
                    "No mandals in this area".to_string(),
                    "Pick another area with [ and ]".to_string(),
                ),
                Tab::Favorites => (
                    "No Favorites Yet".to_string(),
                    "Start adding mandals to your favorites to see them here (2: explore areas)".to_string(),
                ),
            }
        };

        Some(EmptyState { message, subtitle })
    }

    fn compute_alert(&self) -> Option<AlertInfo> {
        if let Some(confirmation) = &self.confirmation {
            return Some(AlertInfo {
                title: confirmation.title.clone(),
                message: confirmation.message.clone(),
                buttons: "y: Remove  n: Cancel".to_string(),
            });
        }

        self.alert.as_ref().map(|alert| AlertInfo {
            title: alert.title.clone(),
            message: alert.message.clone(),
            buttons: "Enter: OK".to_string(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (&self.route, self.input_mode) {
            (Route::Details { .. }, _) => {
                "Esc: back  j/k: scroll  f: favorite  d: directions  m: map  c: call  s: share  q: quit"
            }
            (_, InputMode::Search(SearchFocus::Typing)) => {
                "Esc: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter"
            }
            (_, InputMode::Search(SearchFocus::Navigating)) => {
                "Esc: exit search  /: edit query  j/k: navigate  Enter: details  f: favorite"
            }
            (Route::Tab(Tab::Search), InputMode::Normal) => {
                "/: search  j/k: navigate  Enter: details  f: favorite  d: directions  Tab: next  q: quit"
            }
            (Route::Tab(Tab::Areas), InputMode::Normal) => {
                "[/]: area  /: filter  j/k: navigate  Enter: details  f: favorite  m: map  q: quit"
            }
            (Route::Tab(Tab::Favorites), InputMode::Normal) => {
                "j/k: navigate  Enter: details  x: remove  d: directions  m: map  Tab: next  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            status: self.status.clone(),
        }
    }

    /// Rows left for the mandal list after chrome.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mut chrome = BASE_CHROME_ROWS;
        if self.route == Route::Tab(Tab::Areas) {
            chrome += CHIP_BAR_ROWS;
        }
        if self.compute_search_bar().is_some() {
            chrome += SEARCH_BAR_ROWS;
        }
        total_rows.saturating_sub(chrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Catalog::builtin(), Theme::default())
    }

    #[test]
    fn search_tab_starts_empty_without_no_matches() {
        let state = state();
        assert!(state.filtered_mandals.is_empty());
        assert!(!state.no_matches);

        let vm = state.compute_viewmodel(30, 100);
        assert_eq!(vm.empty_state.unwrap().message, "Type to search mandals");
    }

    #[test]
    fn areas_tab_lists_whole_catalog_then_narrows_by_chip() {
        let mut state = state();
        state.show_tab(Tab::Areas);
        assert_eq!(state.filtered_mandals.len(), state.catalog.len());

        state.cycle_area(true);
        let first_area = state.areas[0].name.clone();
        assert!(state.filtered_mandals.iter().all(|m| m.area == first_area));
        assert_eq!(state.filtered_mandals.len(), state.areas[0].count);

        state.cycle_area(false);
        assert_eq!(state.area_filter(), AreaFilter::All);
        state.cycle_area(false);
        assert_eq!(state.area_index, state.areas.len());
    }

    #[test]
    fn toggling_raises_render_signal() {
        let mut state = state();
        assert!(!state.take_render_request());
        state.favorites.toggle("1");
        assert!(state.take_render_request());
        assert!(!state.take_render_request());
    }

    #[test]
    fn selection_wraps() {
        let mut state = state();
        state.show_tab(Tab::Areas);
        state.move_selection_up();
        assert_eq!(state.selected_index, state.filtered_mandals.len() - 1);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn window_keeps_selection_visible() {
        let mut state = state();
        state.show_tab(Tab::Areas);
        state.selected_index = state.filtered_mandals.len() - 1;

        let vm = state.compute_viewmodel(12, 100);
        assert!(!vm.display_items.is_empty());
        assert!(vm.display_items[vm.selected_index].is_selected);
    }

    #[test]
    fn unknown_detail_id_renders_not_found() {
        let mut state = state();
        state.route = Route::Details {
            mandal_id: "404".into(),
            back: Tab::Search,
        };
        assert!(state.focused_mandal().is_none());
        let vm = state.compute_viewmodel(30, 100);
        assert!(matches!(vm.detail, Some(DetailView::NotFound { .. })));
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn favorites_tab_counts_saved_mandals_and_points_to_areas() {
        let mut state = state();
        state.show_tab(Tab::Favorites);

        let vm = state.compute_viewmodel(30, 100);
        assert_eq!(vm.header.subtitle, "0 saved mandals");
        let empty = vm.empty_state.unwrap();
        assert_eq!(empty.message, "No Favorites Yet");
        assert!(empty.subtitle.contains("2: explore areas"));

        state.favorites.toggle("3");
        state.apply_filters();
        assert_eq!(state.compute_viewmodel(30, 100).header.subtitle, "1 saved mandals");
    }

    #[test]
    fn viewmodel_clamps_detail_scroll() {
        let mut state = state();
        state.open_details("1".into(), Tab::Search);
        state.detail_scroll = 500;

        let max = state.max_detail_scroll(24, 80);
        assert!(max > 0);
        assert_eq!(state.compute_viewmodel(24, 80).detail_scroll, max);

        state.open_details("2".into(), Tab::Search);
        assert_eq!(state.detail_scroll, 0);
    }
}
