//! Page scraping: fetch, extract, clean and enrich one URL at a time.

pub mod article;
pub mod cleaner;
pub mod extractor;
pub mod fetcher;
pub mod processor;

pub use article::{Article, ArticleError};
pub use cleaner::clean_text;
pub use extractor::extract_text;
pub use fetcher::PageFetcher;
pub use processor::{ProcessError, SourceProcessor, SourceRecord};
