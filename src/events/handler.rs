//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Poll timeout for terminal events.
    poll_timeout: Duration,
    /// Store snapshot for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy, Default)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    show_help: bool,
    show_details: bool,
    search_empty: bool,
    has_notifications: bool,
}

impl EventHandler {
    pub fn new(keybindings: KeyBindings, poll_timeout: Duration) -> Self {
        Self {
            keybindings,
            poll_timeout,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            show_help: store.app.show_help,
            show_details: store.explore.show_details,
            search_empty: store.explore.input.is_empty(),
            has_notifications: !store.notifications.is_empty(),
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse),
            // Resizes are picked up by the next draw.
            _ => None,
        })
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.unwrap_or_default();
        let input = InputEvent::from(key);

        if input.is_ctrl_c() {
            return Some(Action::Quit);
        }

        if snapshot.current_view == View::Splash {
            return Some(Action::SetView(View::Explore));
        }

        if snapshot.show_help {
            return self.handle_help_overlay(input);
        }

        if snapshot.show_details {
            return self.handle_details_overlay(input);
        }

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, input, &snapshot),
            InputMode::Search => self.handle_search_mode(key, input, &snapshot),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        let snapshot = self.store_snapshot.unwrap_or_default();
        if snapshot.current_view != View::Explore || snapshot.show_details {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_help_overlay(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.help) || input.matches(&self.keybindings.back) {
            return Some(Action::ToggleHelp);
        }
        None
    }

    fn handle_details_overlay(&self, input: InputEvent) -> Option<Action> {
        if input.matches(&self.keybindings.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.back) || input.matches(&self.keybindings.select) {
            return Some(Action::CloseDetails);
        }
        None
    }

    fn handle_normal_mode(
        &self,
        key: KeyEvent,
        input: InputEvent,
        snapshot: &StoreSnapshot,
    ) -> Option<Action> {
        let kb = &self.keybindings;

        // Global shortcuts
        if input.matches(&kb.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&kb.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&kb.refresh) {
            return Some(Action::Refetch);
        }
        if input.matches(&kb.search) {
            return Some(Action::SetInputMode(InputMode::Search));
        }
        if input.matches(&kb.toggle_theme) {
            return Some(Action::ToggleTheme);
        }
        if input.matches(&kb.system_theme) {
            return Some(Action::UseSystemTheme);
        }
        if input.matches(&kb.toggle_language) {
            return Some(Action::ToggleLanguage);
        }
        if input.matches(&kb.dismiss) {
            return Some(Action::DismissAllNotifications);
        }
        if input.matches(&kb.select) {
            return Some(Action::OpenDetails);
        }
        if input.matches(&kb.back) && snapshot.has_notifications {
            return Some(Action::DismissNotification);
        }

        // Navigation
        if input.matches(&kb.up) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&kb.down) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if input.matches(&kb.left) || key.code == KeyCode::Left {
            return Some(Action::ScrollLeft);
        }
        if input.matches(&kb.right) || key.code == KeyCode::Right {
            return Some(Action::ScrollRight);
        }

        match key.code {
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::GoToTop),
            KeyCode::End | KeyCode::Char('G') => Some(Action::GoToBottom),
            _ => None,
        }
    }

    fn handle_search_mode(
        &self,
        key: KeyEvent,
        input: InputEvent,
        snapshot: &StoreSnapshot,
    ) -> Option<Action> {
        match key.code {
            // First Esc clears, the next leaves the search box.
            KeyCode::Esc if !snapshot.search_empty => Some(Action::SearchClear),
            KeyCode::Esc => Some(Action::SetInputMode(InputMode::Normal)),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Down | KeyCode::Tab => Some(Action::SetInputMode(InputMode::Normal)),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Delete => Some(Action::SearchDelete),
            KeyCode::Left => Some(Action::SearchCursorLeft),
            KeyCode::Right => Some(Action::SearchCursorRight),
            KeyCode::Home => Some(Action::SearchCursorHome),
            KeyCode::End => Some(Action::SearchCursorEnd),
            _ => input.text_char().map(Action::SearchInput),
        }
    }
}
