//! Top-level rendering coordinator.
//!
//! Computes the view model from [`AppState`], draws the whole frame into a
//! buffer and prints it in one write.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders the frame for `state` without printing it.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut frame = String::with_capacity(rows * cols * 2);
    components::render_screen(&mut frame, vm, theme, rows, cols);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event, Tab};
    use crate::catalog::Catalog;

    fn state() -> AppState {
        AppState::new(Catalog::builtin(), Theme::default())
    }

    #[test]
    fn search_tab_shows_prompt_before_typing() {
        let frame = render_to_string(&state(), 24, 100);
        assert!(frame.contains("Type to search mandals"));
        assert!(frame.contains("Search:"));
        assert!(!frame.contains("LOCATION"));
    }

    #[test]
    fn areas_tab_lists_chips_and_rows() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowTab(Tab::Areas)).unwrap();
        let frame = render_to_string(&state, 30, 110);
        assert!(frame.contains("All (12)"));
        assert!(frame.contains("Lalbaugcha Raja"));
        assert!(frame.contains("CROWD"));
    }

    #[test]
    fn detail_screen_replaces_list() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowTab(Tab::Areas)).unwrap();
        handle_event(&mut state, &Event::OpenDetails).unwrap();
        let frame = render_to_string(&state, 40, 100);
        assert!(frame.contains("Visiting Hours:"));
        assert!(!frame.contains("CROWD"));
    }

    #[test]
    fn alert_is_drawn_over_the_screen() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowTab(Tab::Areas)).unwrap();
        handle_event(&mut state, &Event::Share).unwrap();
        let frame = render_to_string(&state, 30, 100);
        assert!(frame.contains("Share Mandal"));
    }

    #[test]
    fn tiny_panes_render_without_panicking() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowTab(Tab::Areas)).unwrap();
        for (rows, cols) in [(0, 0), (1, 1), (3, 10), (8, 30)] {
            let _ = render_to_string(&state, rows, cols);
        }
    }
}
