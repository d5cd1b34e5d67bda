//! Google results through the Serper API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::{SearchError, SearchProvider, SearchResult};

pub struct SerperProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerperProvider {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    #[serde(default)]
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl SearchProvider for SerperProvider {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>, SearchError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&SerperRequest {
                q: query,
                num: num_results,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(data
            .organic
            .into_iter()
            .take(num_results)
            .map(|r| SearchResult {
                title: r.title,
                url: r.link,
                snippet: r.snippet,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "serper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn maps_organic_results_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("X-API-KEY", "serper-key"))
            .and(body_partial_json(json!({ "q": "electric cars" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "organic": [
                    { "title": "First", "link": "https://a.example/1", "snippet": "one" },
                    { "title": "Second", "link": "https://b.example/2" },
                    { "title": "Third", "link": "https://c.example/3" }
                ]
            })))
            .mount(&server)
            .await;

        let provider = SerperProvider::new(Client::new(), "serper-key", server.uri());
        let results = provider.search("electric cars", 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.example/1");
        assert_eq!(results[1].title, "Second");
        assert_eq!(results[1].snippet, "");
    }

    #[tokio::test]
    async fn missing_organic_block_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "searchParameters": {} })))
            .mount(&server)
            .await;

        let provider = SerperProvider::new(Client::new(), "k", server.uri());
        assert!(provider.search("nothing", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejected_key_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Unauthorized."))
            .mount(&server)
            .await;

        let provider = SerperProvider::new(Client::new(), "bad", server.uri());
        let err = provider.search("q", 5).await.unwrap_err();
        assert!(matches!(err, SearchError::ApiError { status: 403, .. }));
    }
}
