//! DuckDuckGo search provider
//!
//! Scrapes the HTML results page. No API key required; used whenever the
//! caller does not supply a Serper key.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::provider::{SearchError, SearchProvider, SearchResult};

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".result").expect("Failed to parse result selector")
});

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a.result__a").expect("Failed to parse result link selector")
});

static SNIPPET_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".result__snippet").expect("Failed to parse snippet selector")
});

pub struct DuckDuckGoProvider {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoProvider {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        let html = response.text().await?;
        Ok(parse_results(&html, num_results))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Pulls result links out of the DuckDuckGo HTML page, in page order.
fn parse_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    document
        .select(&RESULT_SELECTOR)
        .filter_map(|result| {
            let link = result.select(&LINK_SELECTOR).next()?;
            let url = resolve_link(link.value().attr("href")?)?;
            let title = collapse(&link.text().collect::<String>());
            let snippet = result
                .select(&SNIPPET_SELECTOR)
                .next()
                .map(|s| collapse(&s.text().collect::<String>()))
                .unwrap_or_default();
            Some(SearchResult { title, url, snippet })
        })
        .take(max_results)
        .collect()
}

/// DuckDuckGo wraps targets in `//duckduckgo.com/l/?uddg=<encoded>` redirects.
fn resolve_link(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };
    let parsed = Url::parse(&absolute).ok()?;

    if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
        return Some(target.into_owned());
    }
    matches!(parsed.scheme(), "http" | "https").then(|| parsed.to_string())
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
