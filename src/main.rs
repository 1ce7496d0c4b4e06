//! Zellij plugin entry point.
//!
//! Translates Zellij events into [`mandalguide::Event`]s, runs them through
//! [`handle_event`] and executes the returned actions. Opening a map link is a
//! `run_command` whose result comes back as `RunCommandResult`; the context
//! map carries the link kind so failures raise the matching alert.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use mandalguide::app::AppState;
use mandalguide::links::{self, LinkKind};
use mandalguide::{handle_event, Action, Config, Event, InputMode, Route, SearchFocus, Tab};

register_plugin!(State);

/// Context key carrying the [`LinkKind`] tag of an opener command.
const LINK_CONTEXT_KEY: &str = "link";

const REQUESTED_PERMISSIONS: [PermissionType; 3] = [
    PermissionType::ReadApplicationState,
    PermissionType::ChangeApplicationState,
    PermissionType::RunCommands,
];

struct State {
    app: AppState,
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: mandalguide::initialize(&config),
            open_command: config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        mandalguide::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        tracing::debug!(config = ?config, "parsed configuration");

        self.app = mandalguide::initialize(&config);
        self.open_command.clone_from(&config.open_command);

        request_permission(&REQUESTED_PERMISSIONS);
        subscribe(&[
            EventType::Key,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let _guard = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        )
        .entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = match status {
                    PermissionStatus::Granted => REQUESTED_PERMISSIONS.to_vec(),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - map links and hiding the pane will not work");
                        Vec::new()
                    }
                };
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_viewport(rows, cols);
        mandalguide::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if self.app.confirmation.is_some() {
            return match key.bare_key {
                BareKey::Char('y' | 'Y') | BareKey::Enter => Some(Event::Confirm),
                BareKey::Char('n' | 'N') | BareKey::Esc => Some(Event::Cancel),
                _ => None,
            };
        }
        if self.app.alert.is_some() {
            return match key.bare_key {
                BareKey::Enter | BareKey::Esc | BareKey::Char(' ' | 'q') => Some(Event::DismissAlert),
                _ => None,
            };
        }

        let ctrl = key.has_modifiers(&[KeyModifier::Ctrl]);
        if ctrl && key.bare_key == BareKey::Char('n') {
            return Some(Event::KeyDown);
        }
        if ctrl && key.bare_key == BareKey::Char('p') {
            return Some(Event::KeyUp);
        }
        if ctrl && key.bare_key == BareKey::Char('c') {
            return Some(Event::CloseFocus);
        }

        if self.app.route.is_details() {
            return Self::map_detail_key(key.bare_key);
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Self::map_typing_key(key.bare_key),
            InputMode::Search(SearchFocus::Navigating) => self.map_list_key(key, true),
            InputMode::Normal => self.map_list_key(key, false),
        }
    }

    fn map_detail_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Esc | BareKey::Backspace | BareKey::Left | BareKey::Char('h') => Event::Back,
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('f') => Event::ToggleFavorite,
            BareKey::Char('m') => Event::OpenMap,
            BareKey::Char('d') => Event::GetDirections,
            BareKey::Char('c') => Event::CallContact,
            BareKey::Char('s') => Event::Share,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_typing_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Esc => Event::ExitSearch,
            BareKey::Enter | BareKey::Down => Event::FocusResults,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_list_key(&self, key: &KeyWithModifier, searching: bool) -> Option<Event> {
        if key.bare_key == BareKey::Tab && key.has_modifiers(&[KeyModifier::Shift]) {
            return Some(Event::PrevTab);
        }

        let on_areas = self.app.route == Route::Tab(Tab::Areas);
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::OpenDetails,
            BareKey::Esc if searching => Event::ExitSearch,
            BareKey::Esc => Event::Escape,
            BareKey::Char('/') if searching => Event::FocusSearchBar,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Tab => Event::NextTab,
            BareKey::Char('1') => Event::ShowTab(Tab::Search),
            BareKey::Char('2') => Event::ShowTab(Tab::Areas),
            BareKey::Char('3') => Event::ShowTab(Tab::Favorites),
            BareKey::Right | BareKey::Char(']' | 'l') if on_areas => Event::NextArea,
            BareKey::Left | BareKey::Char('[' | 'h') if on_areas => Event::PrevArea,
            BareKey::Char('f') => Event::ToggleFavorite,
            BareKey::Char('x') => Event::RemoveFavorite,
            BareKey::Char('m') => Event::OpenMap,
            BareKey::Char('d') => Event::GetDirections,
            BareKey::Char('c') => Event::CallContact,
            BareKey::Char('s') => Event::Share,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Backspace if searching => Event::Backspace,
            _ => return None,
        })
    }

    fn map_command_result(exit_code: Option<i32>, stderr: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let kind = context.get(LINK_CONTEXT_KEY).and_then(|tag| LinkKind::from_tag(tag))?;
        let stderr = String::from_utf8_lossy(stderr);

        match links::check_launch(exit_code, &stderr) {
            Ok(()) => {
                tracing::debug!(kind = kind.tag(), "link opened");
                None
            }
            Err(e) => {
                tracing::warn!(kind = kind.tag(), error = %e, "opener failed");
                Some(Event::LaunchFailed {
                    kind,
                    reason: links::classify_failure(exit_code),
                })
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::OpenUrl(link) => {
                tracing::debug!(mandal = %link.mandal_name, url = %link.url, "launching opener");
                let context = BTreeMap::from([(LINK_CONTEXT_KEY.to_string(), link.kind.tag().to_string())]);
                run_command(&[self.open_command.as_str(), link.url.as_str()], context);
            }
        }
    }
}
