//! Fetches eBay sold-listings pages through the ScrapeOps rendering proxy.

use crate::config::ScrapeConfig;
use crate::sold::models::ScrapeOutcome;
use crate::sold::parser;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

/// Trait for sold-price lookups - enables mocking for tests.
#[async_trait]
pub trait SoldPriceSource: Send + Sync {
    /// Prices of completed, sold listings matching `search_term`.
    async fn scrape_sold_prices(&self, search_term: &str) -> ScrapeOutcome;
}

/// Builds the sold-listings search URL for `search_term`.
pub fn sold_listings_url(target_base: &str, search_term: &str) -> String {
    let term = urlencoding::encode(search_term).replace("%20", "+");
    format!(
        "{}/sch/i.html?_nkw={}&LH_Complete=1&LH_Sold=1",
        target_base.trim_end_matches('/'),
        term
    )
}

/// Client for the rendering proxy.
pub struct SoldListingsClient {
    config: ScrapeConfig,
}

impl SoldListingsClient {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self { config: config.clone() }
    }

    fn proxy_endpoint(&self) -> String {
        format!("{}/v1/", self.config.proxy_base.trim_end_matches('/'))
    }

    /// Fetches the rendered results page HTML.
    async fn fetch(&self, api_key: &str, target_url: &str) -> Result<String> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        let endpoint = self.proxy_endpoint();
        let url = format!(
            "{}?api_key={}&url={}",
            endpoint,
            urlencoding::encode(api_key),
            urlencoding::encode(target_url)
        );

        // The key is part of the query string, keep it out of the logs
        debug!("GET {}?url={}", endpoint, target_url);

        let response = client.get(&url).send().await.context("Failed to send proxy request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Proxy request failed with status: {} {}", status, body.trim());
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl SoldPriceSource for SoldListingsClient {
    async fn scrape_sold_prices(&self, search_term: &str) -> ScrapeOutcome {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            warn!("SCRAPEOPS_API_KEY is not set, skipping sold-listings scrape");
            return ScrapeOutcome::Skipped("SCRAPEOPS_API_KEY is not set".to_string());
        };

        let target_url = sold_listings_url(&self.config.target_base, search_term);
        info!("Scraping sold listings: {}", search_term);

        match self.fetch(api_key, &target_url).await {
            Ok(html) => ScrapeOutcome::Prices(parser::parse_sold_prices(&html)),
            Err(e) => {
                warn!("Scraping failed for '{}': {:#}", search_term, e);
                ScrapeOutcome::Failed(format!("{:#}", e))
            }
        }
    }
}
