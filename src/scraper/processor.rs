use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use scraper::Html;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use super::article::{Article, ArticleError};
use super::cleaner::clean_text;
use super::extractor::extract_document_text;
use super::fetcher::PageFetcher;

/// Everything gathered about one scraped page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceRecord {
    pub url: String,
    pub title: String,
    pub text: String,
    pub summary: String,
    pub keywords: BTreeSet<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub authors: Vec<String>,
    pub domain: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("url has no host")]
    MissingHost,

    #[error(transparent)]
    Article(#[from] ArticleError),
}

/// Turns a URL into a [`SourceRecord`]: fetch, article pass, text
/// extraction and cleaning.
#[derive(Clone)]
pub struct SourceProcessor {
    fetcher: PageFetcher,
}

impl SourceProcessor {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    /// `None` when the page could not be fetched or any later step failed.
    /// A record is either complete or absent.
    pub async fn process_url(&self, url: &str) -> Option<SourceRecord> {
        let html = self.fetcher.fetch_html(url).await?;

        match build_record(url, &html) {
            Ok(record) => {
                debug!(url, chars = record.text.len(), "Processed source");
                Some(record)
            }
            Err(e) => {
                error!(url, error = %e, "Error processing URL");
                None
            }
        }
    }
}

/// Builds a record from already fetched markup.
pub fn build_record(url: &str, html: &str) -> Result<SourceRecord, ProcessError> {
    let parsed = Url::parse(url)?;
    let domain = parsed.host_str().ok_or(ProcessError::MissingHost)?;
    let domain = match parsed.port() {
        Some(port) => format!("{}:{}", domain, port),
        None => domain.to_string(),
    };

    let document = Html::parse_document(html);
    let raw_text = extract_document_text(&document);
    let article = Article::parse(&document, &raw_text)?;

    Ok(SourceRecord {
        url: url.to_string(),
        title: article.title,
        text: clean_text(&raw_text),
        summary: article.summary,
        keywords: article.keywords,
        publish_date: article.publish_date,
        authors: article.authors,
        domain,
    })
}
