use crate::config::Config;
use crate::core::{BumpError, BumpResult};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Something that can hand back the raw manifest document
pub trait ManifestSource {
    fn fetch(&self, url: &str) -> impl Future<Output = BumpResult<String>>;
}

/// Client for the upstream release manifest
pub struct ManifestClient {
    client: Client,
}

impl ManifestClient {
    /// Create a client with the configured identity and timeout
    pub fn new(config: &Config) -> BumpResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    /// Download the manifest document
    pub async fn fetch_manifest(&self, url: &str) -> BumpResult<String> {
        tracing::info!("Fetching release manifest from {}", url);

        let response = self.client.get(url).send().await.map_err(BumpError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BumpError::Fetch(format!(
                "{} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(BumpError::Http)?;
        check_body(url, body)
    }
}

impl ManifestSource for ManifestClient {
    fn fetch(&self, url: &str) -> impl Future<Output = BumpResult<String>> {
        self.fetch_manifest(url)
    }
}

fn check_body(url: &str, body: String) -> BumpResult<String> {
    if body.trim().is_empty() {
        return Err(BumpError::Fetch(format!("{} returned an empty body", url)));
    }
    tracing::debug!("Fetched {} bytes of manifest", body.len());
    Ok(body)
}
