//! HTTP client for the PetStats server.

use petstats_core::PetStatistics;
use reqwest::Client;

use crate::CliResult;

const STATS_PATH: &str = "/api/stats/pets";

/// Reqwest-backed client for the statistics endpoint.
pub struct StatsClient {
    client: Client,
    server_url: String,
}

impl StatsClient {
    /// Build a client for the given server base URL.
    pub fn new(server_url: &str) -> CliResult<Self> {
        let server_url = normalize_server_url(server_url)?;
        let client = Client::builder().user_agent("petstats-cli").build()?;
        Ok(Self { client, server_url })
    }

    /// Fetch the current pet statistics.
    pub async fn fetch_statistics(&self) -> CliResult<PetStatistics> {
        let url = format!("{}{STATS_PATH}", self.server_url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("statistics request failed: {status}").into());
        }
        Ok(response.json::<PetStatistics>().await?)
    }
}

/// Normalize a server URL by trimming whitespace and trailing slashes.
fn normalize_server_url(server_url: &str) -> CliResult<String> {
    let trimmed = server_url.trim();
    if trimmed.is_empty() {
        return Err("server url is required".into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
