use serde::{Deserialize, Serialize};

use crate::llm::Provider;
use crate::platform::Platform;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationRequest {
    pub provider: Provider,
    pub model_name: String,
    pub api_key: String,
    pub platform: Platform,
    pub input_text: String,
    #[serde(default)]
    pub serper_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: Provider,
    pub models: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderInfo>,
}

#[derive(Debug, Serialize)]
pub struct PlatformInfo {
    pub name: Platform,
    pub instructions: String,
}

#[derive(Debug, Serialize)]
pub struct PlatformsResponse {
    pub platforms: Vec<PlatformInfo>,
}
