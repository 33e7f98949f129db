//! Ticker exploration state.

use crate::api::{Ticker, TickerPages, TickerQuery, TickersResponse};
use crate::components::TextInput;
use crate::events::Debouncer;
use std::time::{Duration, Instant};

/// A page request tagged with the query generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: TickerQuery,
    pub cursor: Option<String>,
}

/// What is currently being fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    FirstPage,
    NextPage,
}

/// User-facing category of a failed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreError {
    /// The API key is missing or rejected.
    Configuration,
    /// Shown verbatim.
    RateLimited(String),
    /// Connectivity or timeout.
    Network,
    Other(String),
}

impl ExploreError {
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_lowercase();
        if message.contains("API key") {
            Self::Configuration
        } else if message.contains("Rate limited") {
            Self::RateLimited(message.to_string())
        } else if lower.contains("network") || lower.contains("timeout") {
            Self::Network
        } else if message.is_empty() {
            Self::Other("An error occurred while fetching tickers".to_string())
        } else {
            Self::Other(message.to_string())
        }
    }
}

/// State of the explore page.
#[derive(Debug)]
pub struct ExploreState {
    /// What the user is typing.
    pub input: TextInput,
    debouncer: Debouncer<String>,
    /// Term the current listing was requested for.
    pub search_term: String,
    pub query: TickerQuery,
    pub pages: TickerPages,
    generation: u64,
    in_flight: Option<FetchKind>,
    pub error: Option<ExploreError>,
    /// Flat index of the selected card.
    pub selected: usize,
    pub columns: usize,
    pub visible_rows: usize,
    pub show_details: bool,
    page_size: u32,
    load_more_threshold: usize,
}

impl Default for ExploreState {
    fn default() -> Self {
        Self::new(50, Duration::from_millis(800), 2)
    }
}

impl ExploreState {
    pub fn new(page_size: u32, debounce: Duration, load_more_threshold: usize) -> Self {
        Self {
            input: TextInput::new(),
            debouncer: Debouncer::new(debounce),
            search_term: String::new(),
            query: TickerQuery::explore("", page_size),
            pages: TickerPages::new(),
            generation: 0,
            in_flight: None,
            error: None,
            selected: 0,
            columns: 1,
            visible_rows: 1,
            show_details: false,
            page_size,
            load_more_threshold,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether any query has been started yet.
    pub fn has_started(&self) -> bool {
        self.generation > 0
    }

    /// Record an edit of the search input at `now`.
    pub fn input_changed(&mut self, now: Instant) {
        self.debouncer.push(self.input.value().to_string(), now);
    }

    /// The debounced search term, once it has settled and differs from the
    /// current one.
    pub fn poll_search(&mut self, now: Instant) -> Option<String> {
        let term = self.debouncer.poll(now)?;
        (term.trim() != self.search_term).then_some(term)
    }

    /// Take the pending input immediately, skipping the debounce.
    pub fn flush_search(&mut self) -> Option<String> {
        self.debouncer.cancel();
        let term = self.input.value().to_string();
        (term.trim() != self.search_term).then_some(term)
    }

    /// Clear the input and drop any pending search.
    pub fn clear_search(&mut self) {
        self.input.clear();
        self.debouncer.cancel();
    }

    /// Switch to the listing for `term`.
    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.trim().to_string();
        self.query = TickerQuery::explore(&self.search_term, self.page_size);
    }

    /// Start loading the current query from its first page.
    pub fn start_first_page(&mut self) -> FetchRequest {
        self.generation += 1;
        self.reset_listing();
        self.in_flight = Some(FetchKind::FirstPage);
        FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
            cursor: None,
        }
    }

    /// Show pages served from the cache for the current query.
    pub fn restore_pages(&mut self, pages: TickerPages) {
        self.generation += 1;
        self.reset_listing();
        self.pages = pages;
    }

    fn reset_listing(&mut self) {
        self.pages = TickerPages::new();
        self.in_flight = None;
        self.error = None;
        self.selected = 0;
        self.show_details = false;
    }

    /// Request for the page after the last loaded one, if one exists and
    /// nothing is in flight.
    pub fn next_page_request(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() || self.error.is_some() {
            return None;
        }
        let cursor = self.pages.next_cursor()?;
        self.in_flight = Some(FetchKind::NextPage);
        Some(FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
            cursor: Some(cursor),
        })
    }

    /// Apply a loaded page. Returns false for responses of an older query.
    pub fn page_loaded(&mut self, generation: u64, page: TickersResponse) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Ignoring stale page");
            return false;
        }
        self.pages.push(page);
        self.in_flight = None;
        self.error = None;
        true
    }

    /// Apply a final failure. Returns false for responses of an older query.
    pub fn page_failed(&mut self, generation: u64, message: &str) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Ignoring stale failure");
            return false;
        }
        self.in_flight = None;
        self.error = Some(ExploreError::from_message(message));
        true
    }

    /// Whether the selection is close enough to the end to load more.
    pub fn near_end(&self) -> bool {
        let len = self.pages.len();
        if len == 0 {
            return false;
        }
        let columns = self.columns.max(1);
        let total_rows = len.div_ceil(columns);
        let row = self.selected / columns;
        total_rows - row - 1 < self.load_more_threshold.max(1)
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.pages.tickers()
    }

    pub fn selected_ticker(&self) -> Option<&Ticker> {
        self.pages.get(self.selected)
    }

    pub fn is_initial_loading(&self) -> bool {
        self.in_flight == Some(FetchKind::FirstPage) && self.pages.is_empty()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.in_flight == Some(FetchKind::NextPage)
    }

    pub fn has_next_page(&self) -> bool {
        self.pages.has_next_page()
    }

    pub fn has_results(&self) -> bool {
        self.pages.len() > 0
    }

    /// Loaded, no error, and nothing to show.
    pub fn is_empty(&self) -> bool {
        self.has_started()
            && !self.is_initial_loading()
            && !self.has_results()
            && self.error.is_none()
    }

    pub fn set_viewport(&mut self, columns: usize, visible_rows: usize) {
        self.columns = columns.max(1);
        self.visible_rows = visible_rows.max(1);
    }

    fn select(&mut self, index: usize) {
        let max = self.pages.len().saturating_sub(1);
        self.selected = index.min(max);
    }

    pub fn move_up(&mut self) {
        self.select(self.selected.saturating_sub(self.columns));
    }

    pub fn move_down(&mut self) {
        let target = self.selected + self.columns;
        if target < self.pages.len() {
            self.select(target);
        } else {
            self.select(self.pages.len().saturating_sub(1));
        }
    }

    pub fn move_left(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn move_right(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn page_up(&mut self) {
        self.select(self.selected.saturating_sub(self.columns * self.visible_rows));
    }

    pub fn page_down(&mut self) {
        self.select(self.selected + self.columns * self.visible_rows);
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_to_bottom(&mut self) {
        self.select(usize::MAX);
    }

    pub fn open_details(&mut self) {
        self.show_details = self.selected_ticker().is_some();
    }

    pub fn close_details(&mut self) {
        self.show_details = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(tickers: &[&str], next_url: Option<&str>) -> TickersResponse {
        TickersResponse {
            results: Some(
                tickers
                    .iter()
                    .map(|t| Ticker {
                        ticker: t.to_string(),
                        name: format!("{t} Inc."),
                        ..Default::default()
                    })
                    .collect(),
            ),
            status: "OK".to_string(),
            request_id: "req".to_string(),
            count: tickers.len() as u64,
            next_url: next_url.map(str::to_string),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExploreError::from_message("Polygon API key is not configured."),
            ExploreError::Configuration
        );
        assert_eq!(
            ExploreError::from_message("Rate limited. Retrying in 60 seconds."),
            ExploreError::RateLimited("Rate limited. Retrying in 60 seconds.".to_string())
        );
        assert_eq!(
            ExploreError::from_message("Network error: connection refused"),
            ExploreError::Network
        );
        assert_eq!(
            ExploreError::from_message("request timeout"),
            ExploreError::Network
        );
        assert_eq!(
            ExploreError::from_message("boom"),
            ExploreError::Other("boom".to_string())
        );
    }

    #[test]
    fn test_debounced_search() {
        let start = Instant::now();
        let mut state = ExploreState::default();

        for c in "aapl".chars() {
            state.input.insert(c);
        }
        state.input_changed(start);
        assert_eq!(state.poll_search(start + Duration::from_millis(500)), None);
        assert_eq!(
            state.poll_search(start + Duration::from_millis(800)),
            Some("aapl".to_string())
        );

        state.set_search("  aapl ");
        assert_eq!(state.search_term, "aapl");
        assert_eq!(state.query.search.as_deref(), Some("aapl"));
        assert_eq!(state.query.limit, 50);
    }

    #[test]
    fn test_unchanged_term_is_not_resubmitted() {
        let start = Instant::now();
        let mut state = ExploreState::default();
        state.input.insert(' ');
        state.input_changed(start);
        assert_eq!(state.poll_search(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let mut state = ExploreState::default();
        let first = state.start_first_page();
        state.set_search("MS");
        let second = state.start_first_page();

        assert!(!state.page_loaded(first.generation, page(&["A"], None)));
        assert!(state.is_initial_loading());
        assert!(!state.page_failed(first.generation, "boom"));
        assert!(state.error.is_none());

        assert!(state.page_loaded(second.generation, page(&["MS", "MSFT"], None)));
        assert_eq!(state.pages.len(), 2);
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_next_page_request() {
        let mut state = ExploreState::default();
        let first = state.start_first_page();
        assert_eq!(state.next_page_request(), None);

        state.page_loaded(
            first.generation,
            page(&["A", "AA"], Some("https://api.polygon.io/v3/reference/tickers?cursor=abc")),
        );
        let next = state.next_page_request().unwrap();
        assert_eq!(next.cursor.as_deref(), Some("abc"));
        assert_eq!(next.generation, first.generation);
        assert!(state.is_fetching_next_page());
        assert_eq!(state.next_page_request(), None);

        state.page_loaded(next.generation, page(&["AAL"], None));
        assert!(!state.has_next_page());
        assert_eq!(state.next_page_request(), None);
        assert_eq!(state.pages.len(), 3);
    }

    #[test]
    fn test_derived_flags() {
        let mut state = ExploreState::default();
        assert!(!state.is_empty());

        let request = state.start_first_page();
        assert!(state.is_initial_loading());
        state.page_loaded(request.generation, page(&[], None));
        assert!(state.is_empty());
        assert!(!state.has_results());

        let request = state.start_first_page();
        state.page_failed(request.generation, "Invalid API key");
        assert!(!state.is_empty());
        assert_eq!(state.error, Some(ExploreError::Configuration));
    }

    #[test]
    fn test_grid_navigation_and_near_end() {
        let mut state = ExploreState::default();
        let request = state.start_first_page();
        state.page_loaded(
            request.generation,
            page(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"], None),
        );
        state.set_viewport(3, 2);

        state.move_down();
        assert_eq!(state.selected, 3);
        state.move_right();
        assert_eq!(state.selected, 4);
        assert!(!state.near_end());

        state.move_down();
        assert_eq!(state.selected, 7);
        assert!(state.near_end());

        state.move_down();
        assert_eq!(state.selected, 9);
        state.page_up();
        assert_eq!(state.selected, 3);
        state.go_to_bottom();
        assert_eq!(state.selected, 9);
        state.go_to_top();
        assert_eq!(state.selected, 0);
        state.move_up();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_details_require_selection() {
        let mut state = ExploreState::default();
        state.open_details();
        assert!(!state.show_details);

        let request = state.start_first_page();
        state.page_loaded(request.generation, page(&["AAPL"], None));
        state.open_details();
        assert_eq!(state.selected_ticker().map(|t| t.ticker.as_str()), Some("AAPL"));
        assert!(state.show_details);
    }
}
