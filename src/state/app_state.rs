//! Application-level state.

use std::time::{Duration, Instant};

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Splash,
    Explore,
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// When the splash screen hands over to the explore view.
    pub splash_deadline: Option<Instant>,
    /// Frame counter for spinners.
    pub tick_count: usize,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Search
    }

    /// Start the splash timer.
    pub fn start_splash(&mut self, now: Instant, duration: Duration) {
        self.current_view = View::Splash;
        self.splash_deadline = Some(now + duration);
    }

    /// Whether the splash screen has been shown long enough.
    pub fn splash_elapsed(&self, now: Instant) -> bool {
        self.current_view == View::Splash && self.splash_deadline.is_some_and(|at| now >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_elapsed() {
        let now = Instant::now();
        let mut state = AppState::new();
        assert!(!state.splash_elapsed(now));

        state.start_splash(now, Duration::from_secs(3));
        assert!(!state.splash_elapsed(now + Duration::from_secs(2)));
        assert!(state.splash_elapsed(now + Duration::from_secs(3)));

        state.current_view = View::Explore;
        assert!(!state.splash_elapsed(now + Duration::from_secs(10)));
    }
}
