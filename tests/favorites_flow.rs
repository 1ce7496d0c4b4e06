//! Favorites store contract and its effect on the screens.

use mandalguide::{handle_event, AppState, Catalog, Event, FavoritesStore, Route, Tab, Theme};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn toggle_sequence_matches_expected_sets() {
    let mut store = FavoritesStore::new();
    let snapshot = |store: &FavoritesStore| store.get_all().iter().cloned().collect::<Vec<_>>();

    assert!(store.toggle("1"));
    assert_eq!(snapshot(&store), vec!["1"]);
    assert!(store.toggle("2"));
    assert_eq!(snapshot(&store), vec!["1", "2"]);
    assert!(!store.toggle("1"));
    assert_eq!(snapshot(&store), vec!["2"]);
}

#[test]
fn double_toggle_restores_membership_and_unknown_ids_are_not_favorites() {
    let mut store = FavoritesStore::new();
    assert!(!store.is_favorite("never-seen"));
    store.toggle("5");
    store.toggle("5");
    assert!(!store.is_favorite("5"));
    assert!(store.is_empty());
    assert_eq!(store.revision(), 2);
}

#[test]
fn observers_see_post_toggle_set_until_unsubscribed() {
    let mut store = FavoritesStore::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = store.subscribe(move |set| sink.borrow_mut().push(set.len()));

    store.toggle("1");
    store.toggle("2");
    assert!(store.unsubscribe(id));
    store.toggle("3");

    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert!(!store.unsubscribe(id));
}

#[test]
fn favorite_from_search_results_shows_everywhere() {
    let mut state = AppState::new(Catalog::builtin(), Theme::default());
    handle_event(&mut state, &Event::SearchMode).unwrap();
    for c in "chembur".chars() {
        handle_event(&mut state, &Event::Char(c)).unwrap();
    }
    handle_event(&mut state, &Event::FocusResults).unwrap();
    handle_event(&mut state, &Event::ToggleFavorite).unwrap();

    let row = &state.compute_viewmodel(30, 100).display_items[0];
    assert!(row.is_favorite);

    handle_event(&mut state, &Event::ShowTab(Tab::Favorites)).unwrap();
    let ids: Vec<&str> = state.filtered_mandals.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["12"]);

    handle_event(&mut state, &Event::OpenDetails).unwrap();
    assert!(matches!(state.route, Route::Details { ref mandal_id, .. } if mandal_id == "12"));
    handle_event(&mut state, &Event::ToggleFavorite).unwrap();
    handle_event(&mut state, &Event::Back).unwrap();
    assert!(state.filtered_mandals.is_empty());

    let vm = state.compute_viewmodel(30, 100);
    assert_eq!(vm.empty_state.map(|e| e.message).as_deref(), Some("No Favorites Yet"));
}
