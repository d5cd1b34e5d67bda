use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::llm::CompletionModel;
use crate::scraper::SourceRecord;
use crate::search::ContentSource;

pub const NO_CONTENT_PLACEHOLDER: &str = "No content generated";

/// Citation metadata kept for each source used in a synthesis.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceCitation {
    pub url: String,
    pub title: String,
    pub domain: String,
    pub publish_date: Option<DateTime<Utc>>,
}

impl From<&SourceRecord> for SourceCitation {
    fn from(record: &SourceRecord) -> Self {
        SourceCitation {
            url: record.url.clone(),
            title: if record.title.trim().is_empty() {
                "Untitled".to_string()
            } else {
                record.title.clone()
            },
            domain: record.domain.clone(),
            publish_date: record.publish_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResearchResult {
    pub content: String,
    pub sources: Vec<SourceCitation>,
}

impl ResearchResult {
    /// Degraded result used when nothing could be scraped.
    pub fn fallback(topic: &str) -> Self {
        ResearchResult {
            content: format!("Based on available information about {}", topic),
            sources: Vec::new(),
        }
    }

    fn failed(topic: &str) -> Self {
        ResearchResult {
            content: format!("Error processing research for {}", topic),
            sources: Vec::new(),
        }
    }
}

/// Gathers web sources for a topic and has the model synthesise them into
/// cited prose.
pub struct ResearchAgent {
    model: Arc<dyn CompletionModel>,
    source: ContentSource,
    max_results: usize,
    max_source_chars: usize,
}

impl ResearchAgent {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        source: ContentSource,
        max_results: usize,
        max_source_chars: usize,
    ) -> Self {
        Self {
            model,
            source,
            max_results,
            max_source_chars,
        }
    }

    /// Never fails: no sources and model errors both produce a result with
    /// explanatory content and an empty source list.
    pub async fn research(&self, topic: &str) -> ResearchResult {
        let sources = self.source.search_and_scrape(topic, self.max_results).await;

        if sources.is_empty() {
            warn!(topic, "No sources found, using fallback content generation");
            return ResearchResult::fallback(topic);
        }

        let corpus = build_corpus(&sources, self.max_source_chars);
        let prompt = build_synthesis_prompt(topic, &corpus);
        info!(
            topic,
            sources = sources.len(),
            prompt_chars = prompt.len(),
            model = self.model.model_id(),
            "Synthesising research"
        );

        match self.model.complete(&prompt).await {
            Ok(completion) => ResearchResult {
                content: completion
                    .content
                    .unwrap_or_else(|| NO_CONTENT_PLACEHOLDER.to_string()),
                sources: sources.iter().map(SourceCitation::from).collect(),
            },
            Err(e) => {
                error!(topic, error = %e, "Research error");
                ResearchResult::failed(topic)
            }
        }
    }
}

/// Concatenates each source's URL and text, in search order.
pub fn build_corpus(sources: &[SourceRecord], max_source_chars: usize) -> String {
    let mut corpus = String::new();
    for source in sources {
        corpus.push_str("\nSource: ");
        corpus.push_str(&source.url);
        corpus.push('\n');
        corpus.push_str(&truncate_at_word(&source.text, max_source_chars));
        corpus.push('\n');
    }
    corpus
}

pub fn build_synthesis_prompt(topic: &str, corpus: &str) -> String {
    let mut result = String::with_capacity(corpus.len() + 800);
    result.push_str(&format!(
        "Analyze and synthesize the following information about {}.\n",
        topic
    ));
    result.push_str("Use only the information provided in the sources.\n");
    result.push_str("Always cite sources when making statements.\n");
    result.push_str("Include URLs and publication dates where available.\n\n");
    result.push_str("Source Material:\n");
    result.push_str(corpus);
    result.push_str(
        "\nGenerate comprehensive content that:\n\
         1. Uses information only from the provided sources\n\
         2. Cites sources for all claims\n\
         3. Includes specific quotes where relevant\n\
         4. Maintains factual accuracy\n\
         5. Organizes information logically\n\
         6. Provides proper attribution\n",
    );
    result
}

/// Cuts `text` to at most `max_chars` characters, backing off to the last
/// space so words stay whole. Appends `...` when anything was dropped.
pub fn truncate_at_word(text: &str, max_chars: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    let head = &text[..cut];
    let head = match head.rfind(' ') {
        Some(space) if space > 0 => &head[..space],
        _ => head,
    };
    format!("{}...", head.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Completion, LlmError};
    use crate::scraper::{PageFetcher, SourceProcessor};
    use crate::search::{SearchError, SearchProvider, SearchResult};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StaticSearch(Vec<String>);

    #[async_trait]
    impl SearchProvider for StaticSearch {
        async fn search(&self, _query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
            Ok(self
                .0
                .iter()
                .take(num_results)
                .map(|url| SearchResult {
                    title: String::new(),
                    url: url.clone(),
                    snippet: String::new(),
                })
                .collect())
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    enum Reply {
        Text(&'static str),
        Empty,
        Fail,
    }

    struct ScriptedModel {
        reply: Reply,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<Completion, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(Completion::text(text)),
                Reply::Empty => Ok(Completion::empty()),
                Reply::Fail => Err(LlmError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }

        fn model_id(&self) -> &str {
            "scripted"
        }
    }

    fn agent(model: Arc<ScriptedModel>, urls: Vec<String>) -> ResearchAgent {
        let processor = SourceProcessor::new(PageFetcher::new(reqwest::Client::new(), Duration::from_secs(5)));
        let source = ContentSource::new(Arc::new(StaticSearch(urls)), processor);
        ResearchAgent::new(model, source, 5, 4000)
    }

    async fn page_server() -> MockServer {
        let server = MockServer::start().await;
        let body = format!(
            "<html><head><title>Wind farms</title></head><body><article><p>{}</p></article></body></html>",
            "Offshore wind capacity doubled in the last decade. ".repeat(8)
        );
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn no_sources_gives_fallback_without_calling_the_model() {
        let model = ScriptedModel::new(Reply::Text("unused"));
        let result = agent(model.clone(), vec![]).research("electric cars").await;

        assert_eq!(result, ResearchResult::fallback("electric cars"));
        assert!(!result.content.is_empty());
        assert!(result.sources.is_empty());
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn synthesis_carries_citations() {
        let server = page_server().await;
        let url = format!("{}/wind", server.uri());
        let model = ScriptedModel::new(Reply::Text("Wind is growing [1]."));

        let result = agent(model.clone(), vec![url.clone()]).research("wind power").await;

        assert_eq!(result.content, "Wind is growing [1].");
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].url, url);
        assert_eq!(result.sources[0].title, "Wind farms");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(&format!("Source: {}", url)));
        assert!(prompts[0].contains("Offshore wind capacity doubled"));
        assert!(prompts[0].contains("Cites sources for all claims"));
    }

    #[tokio::test]
    async fn empty_completion_uses_placeholder() {
        let server = page_server().await;
        let model = ScriptedModel::new(Reply::Empty);
        let result = agent(model, vec![server.uri()]).research("wind").await;

        assert_eq!(result.content, NO_CONTENT_PLACEHOLDER);
        assert_eq!(result.sources.len(), 1);
    }

    #[tokio::test]
    async fn model_failure_becomes_error_result() {
        let server = page_server().await;
        let model = ScriptedModel::new(Reply::Fail);
        let result = agent(model, vec![server.uri()]).research("wind").await;

        assert_eq!(result.content, "Error processing research for wind");
        assert!(result.sources.is_empty());
    }

    #[test]
    fn truncation_respects_words_and_chars() {
        assert_eq!(truncate_at_word("short", 10), "short");
        assert_eq!(truncate_at_word("alpha beta gamma", 12), "alpha beta...");
        assert_eq!(truncate_at_word("ééééé ééééé", 7), "ééééé...");
        assert_eq!(truncate_at_word("unbroken", 4), "unbr...");
    }

    #[test]
    fn corpus_keeps_source_order_and_bounds_each_text() {
        let record = |url: &str, text: &str| SourceRecord {
            url: url.to_string(),
            title: String::new(),
            text: text.to_string(),
            summary: String::new(),
            keywords: Default::default(),
            publish_date: None,
            authors: vec![],
            domain: String::new(),
        };
        let corpus = build_corpus(
            &[record("https://b.example", "second source"), record("https://a.example", &"x ".repeat(100))],
            20,
        );
        let b = corpus.find("https://b.example").unwrap();
        let a = corpus.find("https://a.example").unwrap();
        assert!(b < a);
        assert!(!corpus.contains(&"x ".repeat(20)));
    }

    #[test]
    fn untitled_citation() {
        let record = SourceRecord {
            url: "https://a.example".to_string(),
            title: " ".to_string(),
            text: String::new(),
            summary: String::new(),
            keywords: Default::default(),
            publish_date: None,
            authors: vec![],
            domain: "a.example".to_string(),
        };
        assert_eq!(SourceCitation::from(&record).title, "Untitled");
    }
}
