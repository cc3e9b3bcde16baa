//! Search controller: owns the search state and applies responses.
//!
//! A submission is split in two halves so the UI loop can run the request
//! on a background task: [`SearchController::begin`] moves the state to
//! loading and hands out a [`PendingSearch`] ticket, and
//! [`SearchController::complete`] applies the response for that ticket.
//! Only the most recently issued ticket is applied; a slower, older
//! response arriving late is dropped.

use crate::error::FetchError;
use crate::filter::{self, Filters};
use crate::model::Article;
use crate::nyt::ArticleSearch;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Article>,
    pub status: SearchStatus,
    pub filters: Filters,
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SearchStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Ticket for an issued search. Carry it to the background task and back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSearch {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct SearchController {
    state: SearchState,
    seq: u64,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Start a search. Returns `None` and leaves state untouched for a blank
    /// query.
    pub fn begin(&mut self, query: &str) -> Option<PendingSearch> {
        if query.trim().is_empty() {
            return None;
        }
        self.seq += 1;
        self.state.query = query.to_string();
        self.state.results.clear();
        self.state.status = SearchStatus::Loading;
        tracing::debug!(seq = self.seq, query, "search submitted");
        Some(PendingSearch {
            seq: self.seq,
            query: query.to_string(),
        })
    }

    /// Apply a response. Returns `false` if the ticket was superseded.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<Article>, FetchError>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "dropping stale search response");
            return false;
        }
        match result {
            Ok(articles) => {
                self.state.results = articles;
                self.state.status = SearchStatus::Success;
            }
            Err(e) => {
                self.state.results.clear();
                self.state.status = SearchStatus::Error(e.to_string());
            }
        }
        true
    }

    /// Begin, await the client, and complete in one step.
    pub async fn submit<C: ArticleSearch>(&mut self, client: &C, query: &str) {
        if let Some(pending) = self.begin(query) {
            let result = client.search(&pending.query).await;
            self.complete(pending.seq, result);
        }
    }

    /// Replace the filters. Never triggers a search.
    pub fn set_filters(&mut self, filters: Filters) {
        self.state.filters = filters;
    }

    /// Current results narrowed by the current filters.
    pub fn visible(&self) -> Vec<&Article> {
        filter::filter(&self.state.results, &self.state.filters)
    }

    /// Authors present in the unfiltered results.
    pub fn author_options(&self) -> Vec<String> {
        filter::author_options(&self.state.results)
    }

    /// "No articles found" applies only when idle or settled without error.
    pub fn shows_empty_notice(&self) -> bool {
        !self.state.is_loading() && self.state.error_message().is_none() && self.visible().is_empty()
    }
}
