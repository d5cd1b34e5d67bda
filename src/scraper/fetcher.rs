use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, warn};

/// Downloads page markup over the shared connection pool.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Returns the response body, or `None` when the page could not be
    /// retrieved as text. Failures are logged here and never propagated.
    pub async fn fetch_html(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    warn!(url, timeout = ?self.timeout, "Page fetch timed out");
                } else {
                    warn!(url, error = %e, "Page fetch failed");
                }
                return None;
            }
        };

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !is_textual(content_type) {
                warn!(url, content_type, "Skipping non-text response");
                return None;
            }
        }

        match response.text().await {
            Ok(html) if html.is_empty() => {
                debug!(url, "Empty response body");
                None
            }
            Ok(html) => {
                debug!(url, bytes = html.len(), "Fetched page");
                Some(html)
            }
            Err(e) => {
                warn!(url, error = %e, "Failed to read response body");
                None
            }
        }
    }
}

fn is_textual(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.starts_with("text/") || content_type.contains("html") || content_type.contains("xml")
}
