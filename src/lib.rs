pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod http;
pub mod llm;
pub mod platform;
pub mod research;
pub mod scraper;
pub mod search;

use std::sync::Arc;
use config::Config;
use generator::ContentGenerator;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: ContentGenerator,
}

impl AppState {
    /// Wires the generator to the process-wide HTTP client.
    pub fn new(config: Config, client: reqwest::Client) -> Self {
        AppState {
            generator: ContentGenerator::new(client, Arc::new(config)),
        }
    }
}
