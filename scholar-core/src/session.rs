//! Search session state machine.
//!
//! A [`SearchSession`] owns the query, page position, page size and the
//! result/loading/error state of one search screen. Operations that need the
//! network return a [`SearchRequest`] tagged with a request epoch; the caller
//! executes it and feeds the outcome back through [`SearchSession::resolve`].
//! Only the completion carrying the current epoch is committed.

use crate::error::SessionError;
use crate::pagination::{page_tokens, total_pages, PageToken};
use crate::types::{Publication, SearchResponse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Results per page. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    pub fn get(&self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
        }
    }

    /// Next size in the cycle 10 → 20 → 50 → 10.
    pub fn next(&self) -> PageSize {
        match self {
            PageSize::Ten => PageSize::Twenty,
            PageSize::Twenty => PageSize::Fifty,
            PageSize::Fifty => PageSize::Ten,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = SessionError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        match size {
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            50 => Ok(PageSize::Fifty),
            _ => Err(SessionError::InvalidPageSize { size }),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> u32 {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// A search the caller must execute on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub epoch: u64,
    pub query: String,
    pub page: u32,
    pub size: PageSize,
    /// The results region should be brought into view now.
    pub scroll_to_results: bool,
}

/// What `resolve` did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    Failed,
    /// Superseded request; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    epoch: u64,
    query: String,
    page: u32,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    current_page: u32,
    page_size: PageSize,
    total_results: Option<u64>,
    search_time_ms: f64,
    loading: LoadingState,
    error_message: Option<String>,
    results: Vec<Publication>,
    epoch: u64,
    pending: Option<Pending>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl SearchSession {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            query: String::new(),
            current_page: 1,
            page_size,
            total_results: None,
            search_time_ms: 0.0,
            loading: LoadingState::Idle,
            error_message: None,
            results: Vec::new(),
            epoch: 0,
            pending: None,
        }
    }

    /// A fresh session whose request epochs start after `epoch`.
    ///
    /// Completions addressed to an earlier session sharing the same event
    /// channel can then never match this one.
    pub fn continuing_from(page_size: PageSize, epoch: u64) -> Self {
        Self {
            epoch,
            ..Self::new(page_size)
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    pub fn search_time_ms(&self) -> f64 {
        self.search_time_ms
    }

    pub fn loading_state(&self) -> LoadingState {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn results(&self) -> &[Publication] {
        &self.results
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_loading(&self) -> bool {
        self.loading == LoadingState::Loading
    }

    /// Defined once a search has succeeded.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_results
            .map(|total| total_pages(total, self.page_size.get()))
    }

    pub fn page_tokens(&self) -> Option<Vec<PageToken>> {
        self.total_pages()
            .map(|pages| page_tokens(self.current_page, pages))
    }

    /// True while a newly submitted query is in flight. The committed pages
    /// belong to the previous query until it lands.
    pub fn is_paging_locked(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.query != self.query)
    }

    /// Query that a page size change would re-run: the in-flight one if any,
    /// else the last committed one.
    fn active_query(&self) -> Option<String> {
        if let Some(pending) = &self.pending {
            return Some(pending.query.clone());
        }
        if self.total_results.is_some() && !self.query.is_empty() {
            return Some(self.query.clone());
        }
        None
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Start a fresh search at page 1.
    pub fn submit(&mut self, query: &str) -> Result<SearchRequest, SessionError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            let err = SessionError::empty_query();
            self.fail(&err);
            // An in-flight request must not overwrite the validation error.
            self.supersede();
            return Err(err);
        }
        Ok(self.issue(trimmed.to_string(), 1, false))
    }

    /// Move to `page`. Returns `None` when no results are known yet, the
    /// page is out of range, or a new query is still loading.
    pub fn change_page(&mut self, page: u32) -> Option<SearchRequest> {
        let pages = self.total_pages()?;
        if self.is_paging_locked() {
            tracing::debug!(page, "ignoring page change while a new query loads");
            return None;
        }
        if page < 1 || page > pages {
            tracing::debug!(page, pages, "ignoring out of range page change");
            return None;
        }
        let scroll = page != self.current_page;
        Some(self.issue(self.query.clone(), page, scroll))
    }

    pub fn next_page(&mut self) -> Option<SearchRequest> {
        self.change_page(self.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<SearchRequest> {
        self.change_page(self.current_page.saturating_sub(1))
    }

    /// Store the new size, go back to page 1 and re-run the active query.
    pub fn change_page_size(&mut self, size: PageSize) -> Option<SearchRequest> {
        self.page_size = size;
        self.current_page = 1;
        let query = self.active_query()?;
        Some(self.issue(query, 1, false))
    }

    /// Reset to the freshly mounted state. Keeps the page size preference.
    pub fn clear(&mut self) {
        self.supersede();
        self.query.clear();
        self.results.clear();
        self.total_results = None;
        self.search_time_ms = 0.0;
        self.current_page = 1;
        self.loading = LoadingState::Idle;
        self.error_message = None;
    }

    /// Apply the outcome of the request tagged `epoch`.
    pub fn resolve(
        &mut self,
        epoch: u64,
        outcome: Result<SearchResponse, SessionError>,
    ) -> Commit {
        let pending = match self.pending.take() {
            Some(pending) if pending.epoch == epoch => pending,
            other => {
                self.pending = other;
                tracing::debug!(
                    epoch,
                    current = self.epoch,
                    "dropping stale search completion"
                );
                return Commit::Stale;
            }
        };

        match outcome {
            Ok(response) => {
                self.total_results = Some(response.total);
                self.search_time_ms = response.search_time_ms.max(0.0);
                self.query = response.query;
                self.results = response.results;
                let pages = total_pages(response.total, self.page_size.get());
                self.current_page = pending.page.clamp(1, pages);
                self.loading = LoadingState::Success;
                self.error_message = None;
                Commit::Applied
            }
            Err(err) => {
                tracing::warn!(epoch, error = %err, "search request failed");
                self.fail(&err);
                Commit::Failed
            }
        }
    }

    fn issue(&mut self, query: String, page: u32, scroll_to_results: bool) -> SearchRequest {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = Some(Pending {
            epoch: self.epoch,
            query: query.clone(),
            page,
        });
        self.loading = LoadingState::Loading;
        self.error_message = None;
        SearchRequest {
            epoch: self.epoch,
            query,
            page,
            size: self.page_size,
            scroll_to_results,
        }
    }

    fn supersede(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = None;
    }

    fn fail(&mut self, err: &SessionError) {
        self.loading = LoadingState::Error;
        self.error_message = Some(err.user_message());
    }
}


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
