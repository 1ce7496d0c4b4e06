//! Event handling and state transitions.
//!
//! Events come from the plugin runtime (key presses mapped in `main.rs`,
//! command results, permission results). [`handle_event`] mutates
//! [`AppState`] and returns whether a render is needed plus the side effects
//! to run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextTab`, `PrevTab`, `ShowTab`,
//!   `OpenDetails`, `Back`
//! - **Input**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`,
//!   `Char`, `Backspace`, `Escape`
//! - **Areas**: `NextArea`, `PrevArea`
//! - **Favorites**: `ToggleFavorite`, `RemoveFavorite`, `Confirm`, `Cancel`
//! - **External**: `OpenMap`, `GetDirections`, `CallContact`, `Share`,
//!   `LaunchFailed`, `DismissAlert`
//!
//! While an alert or confirmation is open, only the events that close it (and
//! `CloseFocus`) are processed.
//!
//! # Example
//!
//! ```
//! use mandalguide::app::{handle_event, AppState, Event};
//! use mandalguide::catalog::Catalog;
//! use mandalguide::ui::Theme;
//!
//! let mut state = AppState::new(Catalog::builtin(), Theme::default());
//! handle_event(&mut state, &Event::SearchMode)?;
//! for c in "lal".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! assert!(!state.filtered_mandals.is_empty());
//! # Ok::<(), mandalguide::MandalGuideError>(())
//! ```

use super::modes::{InputMode, Route, SearchFocus, Tab};
use super::state::{Alert, Confirmation};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::links::{self, LaunchFailure, LinkKind, MapLink};
use zellij_tile::prelude::PermissionType;

/// Events triggered by user input or the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down by one row (wraps to top).
    KeyDown,
    /// Moves selection up by one row (wraps to bottom).
    KeyUp,
    NextTab,
    PrevTab,
    ShowTab(Tab),
    /// Opens the detail screen of the selected row.
    OpenDetails,
    /// Leaves the detail screen for the tab it was opened from.
    Back,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input (from navigating).
    FocusSearchBar,
    /// Focuses the result list (from typing).
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Leaves search mode, or the detail screen.
    Escape,

    /// Selects the next area chip (areas tab).
    NextArea,
    /// Selects the previous area chip (areas tab).
    PrevArea,

    /// Toggles the open detail, or the selected row.
    ToggleFavorite,
    /// Asks to remove the selected row from favorites (favorites tab).
    RemoveFavorite,
    /// Accepts the pending confirmation.
    Confirm,
    /// Rejects the pending confirmation.
    Cancel,

    OpenMap,
    GetDirections,
    CallContact,
    Share,
    /// The opener command for a link did not succeed.
    LaunchFailed {
        kind: LinkKind,
        reason: LaunchFailure,
    },
    DismissAlert,

    /// Permissions granted after the startup request.
    PermissionsResult { granted: Vec<PermissionType> },
}

/// Processes an event, mutates state and returns `(should_render, actions)`.
///
/// Favorites toggles raise the state's render signal through the store
/// subscription; when that happens the visible rows are recomputed before
/// returning, so every favorite-derived view is fresh on the next render.
///
/// # Errors
///
/// Currently no event fails; the `Result` mirrors the runtime contract so the
/// plugin shim can log failures uniformly.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let cleared_status = match event {
        Event::LaunchFailed { .. } | Event::PermissionsResult { .. } => false,
        _ => state.status.take().is_some(),
    };

    let outcome = if state.confirmation.is_some() {
        handle_confirmation(state, event)
    } else if state.alert.is_some() {
        handle_alert(state, event)
    } else {
        dispatch(state, event)
    };
    let (should_render, actions) = outcome?;

    let favorites_changed = state.take_render_request();
    if favorites_changed {
        tracing::debug!(revision = state.favorites.revision(), "favorites changed, refreshing rows");
        state.apply_filters();
    }

    Ok((should_render || favorites_changed || cleared_status, actions))
}

fn handle_confirmation(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Confirm => {
            let Some(confirmation) = state.confirmation.take() else {
                return Ok((false, vec![]));
            };
            if state.favorites.is_favorite(&confirmation.mandal_id) {
                state.favorites.toggle(&confirmation.mandal_id);
                let name = state
                    .catalog
                    .get(&confirmation.mandal_id)
                    .map_or(confirmation.mandal_id.as_str(), |m| m.name.as_str());
                state.status = Some(format!("{name} removed from favorites"));
            }
            Ok((true, vec![]))
        }
        Event::Cancel | Event::Escape | Event::DismissAlert => {
            tracing::debug!("confirmation cancelled");
            state.confirmation = None;
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        _ => Ok((false, vec![])),
    }
}

fn handle_alert(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::DismissAlert | Event::Escape | Event::Cancel | Event::Confirm => {
            state.alert = None;
            Ok((true, vec![]))
        }
        Event::LaunchFailed { .. } => dispatch(state, event),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        _ => Ok((false, vec![])),
    }
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::KeyDown => {
            if state.route.is_details() {
                return Ok((state.scroll_detail_down(), vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.route.is_details() {
                return Ok((state.scroll_detail_up(), vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextTab => {
            state.show_tab(state.current_tab().next());
            Ok((true, vec![]))
        }
        Event::PrevTab => {
            state.show_tab(state.current_tab().prev());
            Ok((true, vec![]))
        }
        Event::ShowTab(tab) => {
            if state.route == Route::Tab(*tab) {
                return Ok((false, vec![]));
            }
            state.show_tab(*tab);
            Ok((true, vec![]))
        }
        Event::OpenDetails => {
            let Route::Tab(back) = state.route else {
                return Ok((false, vec![]));
            };
            let Some(mandal) = state.focused_mandal() else {
                tracing::debug!("no mandal selected");
                return Ok((false, vec![]));
            };
            tracing::debug!(mandal_id = %mandal.id, mandal_name = %mandal.name, "opening details");
            let mandal_id = mandal.id.clone();
            state.open_details(mandal_id, back);
            Ok((true, vec![]))
        }
        Event::Back => go_back(state),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::SearchMode => {
            if !state.supports_search() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query.clear();
            state.selected_index = 0;
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.is_empty() {
                state.input_mode = InputMode::Normal;
                state.apply_filters();
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            exit_search(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) || state.route.is_details() {
                return Ok((false, vec![]));
            }
            state.search_query.push(*c);
            state.selected_index = 0;
            tracing::trace!(query = %state.search_query, char = %c, "search query updated");
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(_)) || state.route.is_details() {
                return Ok((false, vec![]));
            }
            state.search_query.pop();
            state.selected_index = 0;
            state.apply_filters();
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.route.is_details() {
                return go_back(state);
            }
            if matches!(state.input_mode, InputMode::Search(_)) {
                exit_search(state);
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }

        Event::NextArea | Event::PrevArea => {
            if state.route != Route::Tab(Tab::Areas) {
                return Ok((false, vec![]));
            }
            state.cycle_area(*event == Event::NextArea);
            Ok((true, vec![]))
        }

        Event::ToggleFavorite => {
            let Some(mandal) = state.focused_mandal() else {
                return Ok((false, vec![]));
            };
            let (id, name) = (mandal.id.clone(), mandal.name.clone());
            let now_favorite = state.favorites.toggle(&id);
            state.status = Some(if now_favorite {
                format!("{name} added to favorites")
            } else {
                format!("{name} removed from favorites")
            });
            Ok((true, vec![]))
        }
        Event::RemoveFavorite => {
            if state.route != Route::Tab(Tab::Favorites) {
                return Ok((false, vec![]));
            }
            let Some(mandal) = state.focused_mandal() else {
                return Ok((false, vec![]));
            };
            state.confirmation = Some(Confirmation {
                title: "Remove Favorite".to_string(),
                message: "Are you sure you want to remove this mandal from favorites?".to_string(),
                mandal_id: mandal.id.clone(),
            });
            Ok((true, vec![]))
        }
        Event::Confirm | Event::Cancel | Event::DismissAlert => Ok((false, vec![])),

        Event::OpenMap | Event::GetDirections => {
            let Some(mandal) = state.focused_mandal() else {
                return Ok((false, vec![]));
            };
            let link = if *event == Event::OpenMap {
                MapLink::search(mandal)
            } else {
                MapLink::directions(mandal)
            };
            tracing::debug!(kind = link.kind.tag(), url = %link.url, "opening link");
            state.status = Some(format!("Opening {} for {}", link_label(link.kind), link.mandal_name));
            Ok((true, vec![Action::OpenUrl(link)]))
        }
        Event::CallContact => {
            let Some(mandal) = state.focused_mandal() else {
                return Ok((false, vec![]));
            };
            state.alert = Some(match &mandal.contact_info.phone {
                Some(phone) => Alert::new("Call", format!("Would you like to call {phone}?")),
                None => Alert::new("No Contact", "Contact information not available for this mandal."),
            });
            Ok((true, vec![]))
        }
        Event::Share => {
            let Some(mandal) = state.focused_mandal() else {
                return Ok((false, vec![]));
            };
            state.alert = Some(Alert::new(
                "Share Mandal",
                format!("Share {} with your friends and family!", mandal.name),
            ));
            Ok((true, vec![]))
        }
        Event::LaunchFailed { kind, reason } => {
            tracing::warn!(kind = kind.tag(), reason = ?reason, "link launch failed");
            let (title, message) = links::failure_alert(*kind, *reason);
            state.alert = Some(Alert::new(title, message));
            Ok((true, vec![]))
        }

        Event::PermissionsResult { granted } => {
            tracing::debug!(granted = ?granted, "permissions result");
            Ok((false, vec![]))
        }
    }
}

fn go_back(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Route::Details { back, .. } = state.route else {
        return Ok((false, vec![]));
    };
    state.route = Route::Tab(back);
    state.detail_scroll = 0;
    state.apply_filters();
    Ok((true, vec![]))
}

fn exit_search(state: &mut AppState) {
    tracing::debug!(query = %state.search_query, "exiting search mode");
    state.input_mode = InputMode::Normal;
    state.search_query.clear();
    state.selected_index = 0;
    state.apply_filters();
}

const fn link_label(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Search => "map",
        LinkKind::Directions => "directions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::ui::theme::Theme;
    use crate::ui::render_to_string;
    use crate::ui::viewmodel::DetailView;

    fn state() -> AppState {
        AppState::new(Catalog::builtin(), Theme::default())
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    fn type_query(state: &mut AppState, text: &str) {
        send(state, Event::SearchMode);
        for c in text.chars() {
            send(state, Event::Char(c));
        }
    }

    fn visible_ids(state: &AppState) -> Vec<String> {
        state.filtered_mandals.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn typing_filters_search_tab() {
        let mut state = state();
        type_query(&mut state, "LAL");
        assert!(!state.filtered_mandals.is_empty());
        assert!(state
            .filtered_mandals
            .iter()
            .all(|m| m.name.to_lowercase().contains("lal") || m.area.to_lowercase().contains("lal")));

        send(&mut state, Event::Backspace);
        send(&mut state, Event::Backspace);
        send(&mut state, Event::Backspace);
        assert!(state.filtered_mandals.is_empty());
        assert!(!state.no_matches);
    }

    #[test]
    fn unmatched_query_sets_no_matches() {
        let mut state = state();
        type_query(&mut state, "zzz");
        assert!(state.filtered_mandals.is_empty());
        assert!(state.no_matches);

        let vm = state.compute_viewmodel(30, 100);
        assert_eq!(vm.empty_state.unwrap().message, "No mandals match \"zzz\"");
    }

    #[test]
    fn escape_leaves_search_and_clears_query() {
        let mut state = state();
        type_query(&mut state, "raja");
        send(&mut state, Event::Escape);
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.search_query.is_empty());
    }

    #[test]
    fn area_chips_cycle_on_areas_tab_only() {
        let mut state = state();
        let (render, _) = send(&mut state, Event::NextArea);
        assert!(!render);

        send(&mut state, Event::ShowTab(Tab::Areas));
        send(&mut state, Event::NextArea);
        let area = state.areas[0].name.clone();
        assert!(state.filtered_mandals.iter().all(|m| m.area == area));

        for _ in 0..state.areas.len() {
            send(&mut state, Event::NextArea);
        }
        assert_eq!(state.area_index, 0);
        assert_eq!(state.filtered_mandals.len(), state.catalog.len());
    }

    #[test]
    fn toggling_in_details_updates_favorites_tab() {
        let mut state = state();
        send(&mut state, Event::ShowTab(Tab::Favorites));
        assert!(state.filtered_mandals.is_empty());

        state.route = Route::Details {
            mandal_id: "4".into(),
            back: Tab::Favorites,
        };
        let (render, _) = send(&mut state, Event::ToggleFavorite);
        assert!(render);
        assert!(state.favorites.is_favorite("4"));
        assert!(state.status.as_deref().unwrap().ends_with("added to favorites"));

        send(&mut state, Event::Back);
        assert_eq!(visible_ids(&state), vec!["4"]);
    }

    #[test]
    fn detail_scrolls_down_to_the_about_section() {
        let mut state = state();
        state.set_viewport(24, 80);
        state.open_details("1".into(), Tab::Areas);

        let frame = render_to_string(&state, 24, 80);
        assert!(frame.contains("Lalbaugcha Raja"));
        assert!(!frame.contains("About"));

        let mut steps = 0;
        while send(&mut state, Event::KeyDown).0 {
            steps += 1;
        }
        assert!(steps > 0);
        assert_eq!(state.detail_scroll, state.max_detail_scroll(24, 80));

        let frame = render_to_string(&state, 24, 80);
        assert!(frame.contains("About"));
        assert!(frame.contains("revered"));

        while send(&mut state, Event::KeyUp).0 {}
        assert_eq!(state.detail_scroll, 0);
    }

    #[test]
    fn reopening_details_starts_at_the_top() {
        let mut state = state();
        state.set_viewport(24, 80);
        send(&mut state, Event::ShowTab(Tab::Areas));
        send(&mut state, Event::OpenDetails);
        send(&mut state, Event::KeyDown);
        send(&mut state, Event::KeyDown);
        assert_eq!(state.detail_scroll, 2);

        send(&mut state, Event::Back);
        assert_eq!(state.detail_scroll, 0);
        send(&mut state, Event::OpenDetails);
        assert_eq!(state.detail_scroll, 0);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn detail_scroll_clamps_when_the_pane_grows() {
        let mut state = state();
        state.set_viewport(24, 80);
        state.open_details("1".into(), Tab::Areas);
        while send(&mut state, Event::KeyDown).0 {}
        let deepest = state.detail_scroll;

        state.set_viewport(60, 200);
        assert_eq!(state.compute_viewmodel(60, 200).detail_scroll, 0);
        let (moved, _) = send(&mut state, Event::KeyUp);
        assert!(!moved);
        assert!(deepest > 0);
        assert_eq!(state.detail_scroll, 0);
    }

    #[test]
    fn toggling_on_favorites_tab_refreshes_rows() {
        let mut state = state();
        state.favorites.toggle("2");
        state.favorites.toggle("7");
        send(&mut state, Event::ShowTab(Tab::Favorites));
        assert_eq!(visible_ids(&state), vec!["2", "7"]);

        send(&mut state, Event::ToggleFavorite);
        assert_eq!(visible_ids(&state), vec!["7"]);
    }

    #[test]
    fn remove_favorite_asks_for_confirmation() {
        let mut state = state();
        state.favorites.toggle("1");
        send(&mut state, Event::ShowTab(Tab::Favorites));

        send(&mut state, Event::RemoveFavorite);
        let pending = state.confirmation.clone().unwrap();
        assert_eq!(pending.title, "Remove Favorite");
        assert_eq!(pending.mandal_id, "1");

        send(&mut state, Event::KeyDown);
        send(&mut state, Event::Cancel);
        assert!(state.confirmation.is_none());
        assert!(state.favorites.is_favorite("1"));

        send(&mut state, Event::RemoveFavorite);
        send(&mut state, Event::Confirm);
        assert!(!state.favorites.is_favorite("1"));
        assert!(state.filtered_mandals.is_empty());
    }

    #[test]
    fn remove_favorite_ignored_outside_favorites_tab() {
        let mut state = state();
        send(&mut state, Event::ShowTab(Tab::Areas));
        send(&mut state, Event::RemoveFavorite);
        assert!(state.confirmation.is_none());
    }

    #[test]
    fn map_actions_carry_encoded_address() {
        let mut state = state();
        state.route = Route::Details {
            mandal_id: "4".into(),
            back: Tab::Search,
        };
        let (_, actions) = send(&mut state, Event::GetDirections);
        let [Action::OpenUrl(link)] = actions.as_slice() else {
            panic!("expected one OpenUrl action, got {actions:?}");
        };
        assert_eq!(link.kind, LinkKind::Directions);
        assert!(link.url.starts_with("https://www.google.com/maps/dir/?api=1&destination="));
        assert!(!link.url.contains(' '));
    }

    #[test]
    fn failed_launch_raises_alert_until_dismissed() {
        let mut state = state();
        send(
            &mut state,
            Event::LaunchFailed {
                kind: LinkKind::Search,
                reason: LaunchFailure::Unsupported,
            },
        );
        assert_eq!(
            state.alert,
            Some(Alert::new("Maps Not Available", "Google Maps is not available on this device"))
        );

        let (render, _) = send(&mut state, Event::NextTab);
        assert!(!render);
        assert_eq!(state.current_tab(), Tab::Search);

        send(&mut state, Event::DismissAlert);
        assert!(state.alert.is_none());
    }

    #[test]
    fn call_contact_reports_missing_phone() {
        let mut state = state();
        let id = state
            .catalog
            .mandals()
            .iter()
            .find(|m| m.contact_info.phone.is_none())
            .map(|m| m.id.clone());
        let Some(id) = id else {
            return;
        };
        state.route = Route::Details {
            mandal_id: id,
            back: Tab::Search,
        };
        send(&mut state, Event::CallContact);
        assert_eq!(state.alert.as_ref().unwrap().title, "No Contact");
    }

    #[test]
    fn share_names_the_mandal() {
        let mut state = state();
        state.route = Route::Details {
            mandal_id: "1".into(),
            back: Tab::Search,
        };
        send(&mut state, Event::Share);
        let alert = state.alert.clone().unwrap();
        assert_eq!(alert.title, "Share Mandal");
        assert_eq!(alert.message, "Share Lalbaugcha Raja with your friends and family!");
    }

    #[test]
    fn unknown_detail_id_only_goes_back() {
        let mut state = state();
        state.route = Route::Details {
            mandal_id: "missing".into(),
            back: Tab::Areas,
        };
        let (render, actions) = send(&mut state, Event::ToggleFavorite);
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.favorites.is_empty());
        assert!(matches!(
            state.compute_viewmodel(30, 100).detail,
            Some(DetailView::NotFound { .. })
        ));

        send(&mut state, Event::Escape);
        assert_eq!(state.route, Route::Tab(Tab::Areas));
    }

    #[test]
    fn open_details_returns_to_same_row() {
        let mut state = state();
        send(&mut state, Event::ShowTab(Tab::Areas));
        send(&mut state, Event::KeyDown);
        send(&mut state, Event::KeyDown);
        let expected = state.filtered_mandals[2].id.clone();

        send(&mut state, Event::OpenDetails);
        assert_eq!(
            state.route,
            Route::Details {
                mandal_id: expected,
                back: Tab::Areas
            }
        );
        send(&mut state, Event::Back);
        assert_eq!(state.selected_index, 2);
    }
}
