//! Search provider trait and shared types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One link returned by a web search, in provider rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected search response: {0}")]
    InvalidResponse(String),
}

/// A web search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns at most `num_results` links, best first.
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
