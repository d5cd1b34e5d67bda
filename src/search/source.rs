use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use super::provider::SearchProvider;
use crate::scraper::{SourceProcessor, SourceRecord};

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Search once, then scrape every hit concurrently.
#[derive(Clone)]
pub struct ContentSource {
    provider: Arc<dyn SearchProvider>,
    processor: SourceProcessor,
}

impl ContentSource {
    pub fn new(provider: Arc<dyn SearchProvider>, processor: SourceProcessor) -> Self {
        Self { provider, processor }
    }

    /// Records for up to `max_results` search hits, in search rank order.
    /// Pages that fail to process are dropped; a failed search gives an
    /// empty list.
    pub async fn search_and_scrape(&self, query: &str, max_results: usize) -> Vec<SourceRecord> {
        let results = match self.provider.search(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                error!(provider = self.provider.name(), error = %e, "Error in search_and_scrape");
                return Vec::new();
            }
        };

        if results.is_empty() {
            info!(provider = self.provider.name(), query, "Search returned no results");
            return Vec::new();
        }

        let urls: Vec<String> = results
            .into_iter()
            .take(max_results)
            .map(|result| result.url)
            .collect();

        // join_all keeps input order and waits for every task.
        let records = join_all(urls.iter().map(|url| self.processor.process_url(url))).await;
        let records: Vec<SourceRecord> = records.into_iter().flatten().collect();

        info!(
            provider = self.provider.name(),
            query,
            requested = urls.len(),
            scraped = records.len(),
            "Scraped search results"
        );
        records
    }
}
