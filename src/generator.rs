use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::api::models::{GenerationRequest, GenerationResponse};
use crate::config::Config;
use crate::error::Result;
use crate::llm::{CompletionModel, build_model};
use crate::research::{ResearchAgent, SourceCitation};
use crate::scraper::{PageFetcher, SourceProcessor};
use crate::search::{ContentSource, SearchProvider, provider_for};

pub const GENERATION_FAILED: &str = "Content generation failed";
const SUMMARY_CHARS: usize = 500;

/// Top-level pipeline behind `POST /api/generate`.
#[derive(Clone)]
pub struct ContentGenerator {
    client: Client,
    config: Arc<Config>,
}

impl ContentGenerator {
    pub fn new(client: Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    pub async fn generate(&self, req: &GenerationRequest) -> Result<GenerationResponse> {
        let model = build_model(req.provider, &req.model_name, &req.api_key, &self.client, &self.config);
        let search = provider_for(req.serper_api_key.as_deref(), &self.client, &self.config);
        self.generate_with(req, model, search).await
    }

    /// Runs the pipeline with explicit model and search backends.
    pub async fn generate_with(
        &self,
        req: &GenerationRequest,
        model: Arc<dyn CompletionModel>,
        search: Arc<dyn SearchProvider>,
    ) -> Result<GenerationResponse> {
        info!(
            platform = %req.platform,
            provider = req.provider.as_str(),
            model = model.model_id(),
            search = search.name(),
            "Starting content generation"
        );

        let fetcher = PageFetcher::new(self.client.clone(), self.config.fetch_timeout);
        let source = ContentSource::new(search, SourceProcessor::new(fetcher));
        let researcher = ResearchAgent::new(
            model.clone(),
            source,
            self.config.max_search_results,
            self.config.max_source_chars,
        );
        let research = researcher.research(&req.input_text).await;

        let prompt = build_content_prompt(req, &research.content);
        let completion = model.complete(&prompt).await?;

        let content = match completion.content {
            Some(text) => format!("{}{}", text, format_citations(&research.sources)),
            None => GENERATION_FAILED.to_string(),
        };

        info!(
            platform = %req.platform,
            sources = research.sources.len(),
            chars = content.len(),
            "Content generation finished"
        );

        Ok(GenerationResponse {
            content,
            summary: Some(summarize(&research.content)),
            status: "success".to_string(),
        })
    }
}

fn build_content_prompt(req: &GenerationRequest, research: &str) -> String {
    let mut result = String::with_capacity(research.len() + 1500);
    result.push_str(&format!(
        "Create {} content following these guidelines:\n",
        req.platform
    ));
    result.push_str(&req.platform.instructions());
    result.push_str("\n\nUse this researched information:\n");
    result.push_str(research);
    result.push_str("\n\nInclude source citations appropriately for the platform.\n");
    result.push_str("Maintain factual accuracy and proper attribution.\n");
    result
}

/// Numbered source list appended to the generated copy. Empty when there
/// are no sources.
pub fn format_citations(sources: &[SourceCitation]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut block = String::from("\n\nSources:\n");
    for (idx, source) in sources.iter().enumerate() {
        block.push_str(&format!("{}. {} - {}", idx + 1, source.title, source.url));
        if let Some(date) = source.publish_date {
            block.push_str(&format!(" ({})", date.format("%Y-%m-%d")));
        }
        block.push('\n');
    }
    block
}

/// First 500 characters of the research text, with `...` when cut.
pub fn summarize(research: &str) -> String {
    match research.char_indices().nth(SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &research[..cut]),
        None => research.to_string(),
    }
}
