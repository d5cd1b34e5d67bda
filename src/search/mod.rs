//! Web search and the search-then-scrape content source.

pub mod duckduckgo;
pub mod provider;
pub mod serper;
pub mod source;

use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;

pub use duckduckgo::DuckDuckGoProvider;
pub use provider::{SearchError, SearchProvider, SearchResult};
pub use serper::SerperProvider;
pub use source::{ContentSource, DEFAULT_MAX_RESULTS};

/// Serper when the caller brought a key, DuckDuckGo otherwise.
pub fn provider_for(
    serper_api_key: Option<&str>,
    client: &Client,
    config: &Config,
) -> Arc<dyn SearchProvider> {
    match serper_api_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => Arc::new(SerperProvider::new(client.clone(), key, &config.serper_api_base)),
        None => Arc::new(DuckDuckGoProvider::new(client.clone(), &config.duckduckgo_url)),
    }
}
