//! Accumulated pages of one listing.

use super::query::extract_cursor;
use super::types::{Ticker, TickersResponse};

/// Pages loaded so far for a single query, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerPages {
    pages: Vec<TickersResponse>,
}

impl TickerPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next page.
    pub fn push(&mut self, page: TickersResponse) {
        self.pages.push(page);
    }

    /// Number of pages loaded.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total records across pages.
    pub fn len(&self) -> usize {
        self.pages.iter().map(|p| p.results().len()).sum()
    }

    /// Cursor for the page after the last loaded one.
    pub fn next_cursor(&self) -> Option<String> {
        self.pages
            .last()
            .and_then(|page| extract_cursor(page.next_url.as_deref()))
    }

    /// Whether another page can be requested.
    pub fn has_next_page(&self) -> bool {
        self.next_cursor().is_some()
    }

    /// Records across all pages, in page order.
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.pages.iter().flat_map(|page| page.results().iter())
    }

    /// Record at a flat index.
    pub fn get(&self, index: usize) -> Option<&Ticker> {
        self.tickers().nth(index)
    }

    pub fn pages(&self) -> &[TickersResponse] {
        &self.pages
    }
}

impl From<Vec<TickersResponse>> for TickerPages {
    fn from(pages: Vec<TickersResponse>) -> Self {
        Self { pages }
    }
}

/// Concatenate every page's results in page order.
pub fn flat_tickers(pages: &[TickersResponse]) -> Vec<Ticker> {
    pages
        .iter()
        .flat_map(|page| page.results().iter().cloned())
        .collect()
}
