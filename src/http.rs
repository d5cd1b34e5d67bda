use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

/// Builds the process-wide client. Every fetch, search and LLM call clones
/// this handle, so they all share one connection pool.
pub fn build_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?;
    Ok(client)
}
