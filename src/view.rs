//! State machine behind the search page: query in, cards out.
//!
//! The browser page in `static/` is a direct rendering of this model; keeping
//! the transitions here makes them testable without a browser.

use crate::models::{SearchRequest, SearchResponse, Show};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn recommend(&self, description: &str) -> Result<SearchResponse>;
}

/// Talks to the relay the same way the page's fetch call does.
#[derive(Debug, Clone)]
pub struct RelayBackend {
    client: Client,
    url: String,
}

impl RelayBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            client: Client::new(),
            url: format!("{}/api/tv", base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SearchBackend for RelayBackend {
    async fn recommend(&self, description: &str) -> Result<SearchResponse> {
        let res = self
            .client
            .post(&self.url)
            .json(&SearchRequest {
                description: description.to_string(),
            })
            .send()
            .await
            .context("request failed")?;
        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("search failed with status {}", status);
        }
        res.json().await.context("JSON parse failed")
    }
}

/// What the page is doing right now. Loading always starts from a cleared
/// result list, so stale cards can never sit behind the spinner.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Loading,
    Displaying(Vec<Show>),
}

#[derive(Debug, Default)]
pub struct SearchView {
    state: SearchState,
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::Idle
    }
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    /// Cards currently on screen. Empty outside of `Displaying`.
    pub fn shows(&self) -> &[Show] {
        match &self.state {
            SearchState::Displaying(shows) => shows,
            _ => &[],
        }
    }

    /// Gate and enter `Loading`. A blank query is a no-op and returns None;
    /// otherwise prior results are discarded and the request to send comes
    /// back. The description is sent as typed; trimming only gates.
    pub fn begin_submit(&mut self, query: &str) -> Option<SearchRequest> {
        if query.trim().is_empty() {
            return None;
        }
        self.state = SearchState::Loading;
        Some(SearchRequest {
            description: query.to_string(),
        })
    }

    /// Leave `Loading` with whatever the request produced. Failures are
    /// logged and land on an empty list; the user is never shown an error.
    pub fn finish_submit(&mut self, outcome: Result<SearchResponse>) {
        let results = match outcome {
            Ok(response) => response.results,
            Err(e) => {
                error!("Search failed: {:#}", e);
                Vec::new()
            }
        };
        self.state = SearchState::Displaying(results);
    }

    /// One full submission cycle against a backend.
    pub async fn submit(&mut self, backend: &dyn SearchBackend, query: &str) {
        let Some(request) = self.begin_submit(query) else {
            return;
        };
        let outcome = backend.recommend(&request.description).await;
        self.finish_submit(outcome);
    }
}
