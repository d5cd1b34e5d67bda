use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};
use crate::search::DEFAULT_MAX_RESULTS;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com";
pub const DEFAULT_SERPER_API_BASE: &str = "https://google.serper.dev";
pub const DEFAULT_DUCKDUCKGO_URL: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Per-page fetch timeout.
    pub fetch_timeout: Duration,
    /// How many search links are scraped per research call.
    pub max_search_results: usize,
    /// Upper bound on each source's text in the synthesis corpus.
    pub max_source_chars: usize,
    pub gemini_api_base: String,
    pub groq_api_base: String,
    pub serper_api_base: String,
    pub duckduckgo_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000),
            fetch_timeout: Duration::from_secs(10),
            max_search_results: DEFAULT_MAX_RESULTS,
            max_source_chars: 4000,
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            groq_api_base: DEFAULT_GROQ_API_BASE.to_string(),
            serper_api_base: DEFAULT_SERPER_API_BASE.to_string(),
            duckduckgo_url: DEFAULT_DUCKDUCKGO_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "8000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let fetch_timeout = match lookup("FETCH_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number(&raw, "FETCH_TIMEOUT_SECS")?),
            None => defaults.fetch_timeout,
        };
        let max_search_results = match lookup("MAX_SEARCH_RESULTS") {
            Some(raw) => parse_number(&raw, "MAX_SEARCH_RESULTS")? as usize,
            None => defaults.max_search_results,
        };
        let max_source_chars = match lookup("MAX_SOURCE_CHARS") {
            Some(raw) => parse_number(&raw, "MAX_SOURCE_CHARS")? as usize,
            None => defaults.max_source_chars,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            fetch_timeout,
            max_search_results,
            max_source_chars,
            gemini_api_base: lookup("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            groq_api_base: lookup("GROQ_API_BASE").unwrap_or(defaults.groq_api_base),
            serper_api_base: lookup("SERPER_API_BASE").unwrap_or(defaults.serper_api_base),
            duckduckgo_url: lookup("DUCKDUCKGO_URL").unwrap_or(defaults.duckduckgo_url),
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

fn parse_number(raw: &str, key: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e)))
}
