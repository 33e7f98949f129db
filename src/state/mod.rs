//! State management for Tickerscope.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Views read the
//! [`Store`]; input and background tasks only ever send [`Action`]s.

mod app_state;
mod explore_state;
mod notification;

pub use app_state::{AppState, InputMode, View};
pub use explore_state::{ExploreError, ExploreState, FetchKind, FetchRequest};
pub use notification::{Notification, NotificationLevel, NotificationStack};

use crate::api::{QueryCache, TickersResponse};
use crate::config::Config;
use crate::error::Result;
use crate::prefs::{LanguageStore, LocalStorage, ThemeMode, ThemeStore};
use chrono::Utc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    SetInputMode(InputMode),

    // Search input
    SearchInput(char),
    SearchBackspace,
    SearchDelete,
    SearchCursorLeft,
    SearchCursorRight,
    SearchCursorHome,
    SearchCursorEnd,
    /// Clear the input and show the unfiltered listing immediately.
    SearchClear,
    /// Apply the typed term without waiting for the debounce.
    SearchSubmit,

    // Ticker data
    /// Start a page request. Handled by the app, which runs it in the background.
    FetchTickers(FetchRequest),
    TickersLoaded {
        generation: u64,
        page: TickersResponse,
    },
    TickersFailed {
        generation: u64,
        message: String,
    },
    LoadNextPage,
    Refetch,

    // UI actions
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    OpenDetails,
    CloseDetails,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    DismissAllNotifications,

    // Preferences
    ToggleTheme,
    UseSystemTheme,
    SystemThemeChanged(ThemeMode),
    ToggleLanguage,

    Tick,

    // Quit
    Quit,
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Explore page state.
    pub explore: ExploreState,
    /// Visible toasts.
    pub notifications: NotificationStack,
    pub theme: ThemeStore,
    pub language: LanguageStore,
    cache: QueryCache,
    splash_duration: Duration,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a store with in-memory preferences.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, config: &Config) -> Self {
        let explore = ExploreState::new(
            config.api.page_size,
            Duration::from_millis(config.ui.search_debounce_ms),
            config.ui.load_more_threshold,
        );
        let storage = LocalStorage::in_memory();

        Self {
            app: AppState::new(),
            explore,
            notifications: NotificationStack::new(config.ui.max_notifications),
            theme: ThemeStore::new(storage.clone()),
            language: LanguageStore::initialize(storage),
            cache: QueryCache::default(),
            splash_duration: Duration::from_secs(config.ui.splash_secs),
            action_tx,
        }
    }

    /// Restore theme and language from `storage`.
    pub fn with_preferences(mut self, storage: LocalStorage, system_theme: ThemeMode) -> Self {
        self.theme = ThemeStore::new(storage.clone());
        self.theme.initialize(system_theme);
        self.language = LanguageStore::initialize(storage);
        self
    }

    /// Show the splash screen, starting its timer at `now`.
    pub fn start(&mut self, now: Instant) {
        self.app.start_splash(now, self.splash_duration);
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    fn dispatch_or_log(&self, action: Action) {
        if let Err(e) = self.dispatch(action) {
            tracing::error!(error = %e, "Failed to dispatch action");
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        self.reduce_at(action, Instant::now());
    }

    /// Apply an action as if it happened at `now`.
    pub fn reduce_at(&mut self, action: Action, now: Instant) {
        match action {
            // Navigation
            Action::SetView(View::Explore) => self.enter_explore(now),
            Action::SetView(View::Splash) => self.app.start_splash(now, self.splash_duration),
            Action::SetInputMode(mode) => self.app.input_mode = mode,

            // Search input
            Action::SearchInput(c) => {
                self.explore.input.insert(c);
                self.explore.input_changed(now);
            }
            Action::SearchBackspace => {
                self.explore.input.backspace();
                self.explore.input_changed(now);
            }
            Action::SearchDelete => {
                self.explore.input.delete();
                self.explore.input_changed(now);
            }
            Action::SearchCursorLeft => self.explore.input.move_left(),
            Action::SearchCursorRight => self.explore.input.move_right(),
            Action::SearchCursorHome => self.explore.input.move_home(),
            Action::SearchCursorEnd => self.explore.input.move_end(),
            Action::SearchClear => {
                self.explore.clear_search();
                if !self.explore.search_term.is_empty() {
                    self.commit_search("", now);
                }
            }
            Action::SearchSubmit => {
                if let Some(term) = self.explore.flush_search() {
                    self.commit_search(&term, now);
                }
                self.app.input_mode = InputMode::Normal;
            }

            // Ticker data. The request itself is run by the app.
            Action::FetchTickers(_) => {}
            Action::TickersLoaded { generation, page } => {
                if self.explore.page_loaded(generation, page) {
                    self.cache
                        .insert(self.explore.query.clone(), self.explore.pages.clone(), now);
                    self.load_more_if_near_end();
                }
            }
            Action::TickersFailed {
                generation,
                message,
            } => {
                self.explore.page_failed(generation, &message);
            }
            Action::LoadNextPage => self.load_next_page(),
            Action::Refetch => {
                self.cache.remove(&self.explore.query);
                let request = self.explore.start_first_page();
                self.dispatch_or_log(Action::FetchTickers(request));
            }

            // UI actions
            Action::ScrollUp => self.explore.move_up(),
            Action::ScrollDown => {
                self.explore.move_down();
                self.load_more_if_near_end();
            }
            Action::ScrollLeft => self.explore.move_left(),
            Action::ScrollRight => {
                self.explore.move_right();
                self.load_more_if_near_end();
            }
            Action::PageUp => self.explore.page_up(),
            Action::PageDown => {
                self.explore.page_down();
                self.load_more_if_near_end();
            }
            Action::GoToTop => self.explore.go_to_top(),
            Action::GoToBottom => {
                self.explore.go_to_bottom();
                self.load_more_if_near_end();
            }
            Action::OpenDetails => self.explore.open_details(),
            Action::CloseDetails => self.explore.close_details(),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => self.notifications.push(notification),
            Action::DismissNotification => self.notifications.dismiss_latest(),
            Action::DismissAllNotifications => self.notifications.dismiss_all(),

            // Preferences
            Action::ToggleTheme => self.theme.toggle_theme(),
            Action::UseSystemTheme => self.theme.reset_to_system(),
            Action::SystemThemeChanged(mode) => self.theme.update_system_theme(mode),
            Action::ToggleLanguage => self.language.toggle_language(),

            Action::Tick => self.on_tick(now),

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    /// Advance timers: splash hand-over, search debounce, toast expiry and
    /// cache eviction.
    pub fn on_tick(&mut self, now: Instant) {
        self.app.tick_count = self.app.tick_count.wrapping_add(1);

        if self.app.splash_elapsed(now) {
            self.enter_explore(now);
        }

        if let Some(term) = self.explore.poll_search(now) {
            self.commit_search(&term, now);
        }

        self.notifications.expire(Utc::now());
        self.cache.collect_garbage(now);
    }

    fn enter_explore(&mut self, now: Instant) {
        self.app.current_view = View::Explore;
        self.app.splash_deadline = None;
        if !self.explore.has_started() {
            self.load_current_query(now);
        }
    }

    fn commit_search(&mut self, term: &str, now: Instant) {
        tracing::debug!(term, "Searching tickers");
        self.explore.set_search(term);
        self.load_current_query(now);
    }

    /// Show the current query from the cache, or fetch its first page.
    fn load_current_query(&mut self, now: Instant) {
        if let Some(pages) = self.cache.get_fresh(&self.explore.query, now) {
            let pages = pages.clone();
            self.explore.restore_pages(pages);
            return;
        }
        let request = self.explore.start_first_page();
        self.dispatch_or_log(Action::FetchTickers(request));
    }

    fn load_next_page(&mut self) {
        if let Some(request) = self.explore.next_page_request() {
            self.dispatch_or_log(Action::FetchTickers(request));
        }
    }

    fn load_more_if_near_end(&mut self) {
        if self.explore.near_end() {
            self.load_next_page();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Ticker;
    use pretty_assertions::assert_eq;

    fn store() -> (Store, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Store::new(tx, &Config::default()), rx)
    }

    fn page(count: usize, next_url: Option<&str>) -> TickersResponse {
        TickersResponse {
            results: Some(
                (0..count)
                    .map(|i| Ticker {
                        ticker: format!("T{i}"),
                        ..Default::default()
                    })
                    .collect(),
            ),
            next_url: next_url.map(str::to_string),
            ..Default::default()
        }
    }

    fn next_fetch(rx: &mut mpsc::UnboundedReceiver<Action>) -> Option<FetchRequest> {
        while let Ok(action) = rx.try_recv() {
            if let Action::FetchTickers(request) = action {
                return Some(request);
            }
        }
        None
    }

    #[test]
    fn test_splash_hands_over_and_fetches() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.start(now);

        store.on_tick(now + Duration::from_secs(1));
        assert_eq!(store.app.current_view, View::Splash);
        assert!(next_fetch(&mut rx).is_none());

        store.on_tick(now + Duration::from_secs(3));
        assert_eq!(store.app.current_view, View::Explore);
        let request = next_fetch(&mut rx).unwrap();
        assert_eq!(request.cursor, None);
        assert_eq!(request.query.search, None);
        assert_eq!(request.query.limit, 50);
    }

    #[test]
    fn test_key_on_splash_enters_explore_once() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.start(now);
        store.reduce_at(Action::SetView(View::Explore), now);
        store.reduce_at(Action::SetView(View::Explore), now);

        assert!(next_fetch(&mut rx).is_some());
        assert!(next_fetch(&mut rx).is_none());
        store.on_tick(now + Duration::from_secs(5));
        assert!(next_fetch(&mut rx).is_none());
    }

    #[test]
    fn test_search_is_debounced() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.reduce_at(Action::SetView(View::Explore), now);
        next_fetch(&mut rx);

        for c in "aapl".chars() {
            store.reduce_at(Action::SearchInput(c), now);
        }
        store.on_tick(now + Duration::from_millis(400));
        assert!(next_fetch(&mut rx).is_none());

        store.on_tick(now + Duration::from_millis(800));
        let request = next_fetch(&mut rx).unwrap();
        assert_eq!(request.query.search.as_deref(), Some("aapl"));
        assert_eq!(store.explore.search_term, "aapl");
    }

    #[test]
    fn test_clear_commits_immediately() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.reduce_at(Action::SetView(View::Explore), now);
        store.reduce_at(Action::SearchInput('m'), now);
        store.reduce_at(Action::SearchSubmit, now);
        next_fetch(&mut rx);
        next_fetch(&mut rx);

        store.reduce_at(Action::SearchClear, now);
        assert!(store.explore.input.is_empty());
        let request = next_fetch(&mut rx).unwrap();
        assert_eq!(request.query.search, None);
    }

    #[test]
    fn test_last_request_wins() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.reduce_at(Action::SetView(View::Explore), now);
        let first = next_fetch(&mut rx).unwrap();

        store.reduce_at(Action::SearchInput('x'), now);
        store.reduce_at(Action::SearchSubmit, now);
        let second = next_fetch(&mut rx).unwrap();

        store.reduce_at(
            Action::TickersLoaded {
                generation: second.generation,
                page: page(2, None),
            },
            now,
        );
        store.reduce_at(
            Action::TickersLoaded {
                generation: first.generation,
                page: page(10, None),
            },
            now,
        );
        assert_eq!(store.explore.pages.len(), 2);
    }

    #[test]
    fn test_infinite_scroll_requests_next_page() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.reduce_at(Action::SetView(View::Explore), now);
        let first = next_fetch(&mut rx).unwrap();
        store.explore.set_viewport(1, 3);

        store.reduce_at(
            Action::TickersLoaded {
                generation: first.generation,
                page: page(4, Some("https://api.polygon.io/v3/reference/tickers?cursor=next1")),
            },
            now,
        );
        assert!(next_fetch(&mut rx).is_none());

        store.reduce_at(Action::ScrollDown, now);
        assert!(next_fetch(&mut rx).is_none());
        store.reduce_at(Action::ScrollDown, now);
        let next = next_fetch(&mut rx).unwrap();
        assert_eq!(next.cursor.as_deref(), Some("next1"));

        // Already in flight.
        store.reduce_at(Action::ScrollDown, now);
        assert!(next_fetch(&mut rx).is_none());
    }

    #[test]
    fn test_cached_query_is_not_refetched() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.reduce_at(Action::SetView(View::Explore), now);
        let first = next_fetch(&mut rx).unwrap();
        store.reduce_at(
            Action::TickersLoaded {
                generation: first.generation,
                page: page(3, None),
            },
            now,
        );

        store.reduce_at(Action::SearchInput('z'), now);
        store.reduce_at(Action::SearchSubmit, now);
        next_fetch(&mut rx).unwrap();

        store.reduce_at(Action::SearchClear, now + Duration::from_secs(10));
        assert!(next_fetch(&mut rx).is_none());
        assert_eq!(store.explore.pages.len(), 3);
    }

    #[test]
    fn test_refetch_drops_cache_and_errors() {
        let (mut store, mut rx) = store();
        let now = Instant::now();
        store.reduce_at(Action::SetView(View::Explore), now);
        let first = next_fetch(&mut rx).unwrap();
        store.reduce_at(
            Action::TickersFailed {
                generation: first.generation,
                message: "Network error: connection reset".to_string(),
            },
            now,
        );
        assert_eq!(store.explore.error, Some(ExploreError::Network));

        store.reduce_at(Action::Refetch, now);
        let retry = next_fetch(&mut rx).unwrap();
        assert!(retry.generation > first.generation);
        assert!(store.explore.error.is_none());
        assert!(store.explore.is_initial_loading());
    }

    #[test]
    fn test_notifications_and_preferences() {
        let (mut store, _rx) = store();
        store.reduce(Action::ShowNotification(Notification::info("hello")));
        store.reduce(Action::ShowNotification(Notification::error("oops")));
        store.reduce(Action::DismissNotification);
        assert_eq!(store.notifications.len(), 1);
        store.reduce(Action::DismissAllNotifications);
        assert!(store.notifications.is_empty());

        store.reduce(Action::ToggleLanguage);
        assert!(store.language.is_rtl());

        let mode = store.theme.mode;
        store.reduce(Action::ToggleTheme);
        assert_ne!(store.theme.mode, mode);
    }

    #[test]
    fn test_quit() {
        let (mut store, _rx) = store();
        store.reduce(Action::Quit);
        assert!(store.app.should_quit);
    }
}
