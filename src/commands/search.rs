//! Keyword and image search commands.

use crate::config::Config;
use crate::ebay::{EbayClient, KeywordSearch, MarketplaceSearch, SearchPayload};
use crate::format::Formatter;
use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;
use tracing::info;

/// Executes eBay searches.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes a keyword search and returns formatted output.
    pub async fn execute(&self, search: &KeywordSearch) -> Result<String> {
        let client = EbayClient::new(&self.config.ebay);
        self.execute_with_client(&client, search).await
    }

    /// Executes the keyword search with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl MarketplaceSearch,
        search: &KeywordSearch,
    ) -> Result<String> {
        let response = client
            .search_by_keyword(search)
            .await
            .with_context(|| format!("eBay keyword search failed for '{}'", search.query))?;

        let payload = SearchPayload::from_response(&response);
        info!("Found {} items ({} total)", payload.items.len(), payload.total);

        Ok(Formatter::new(self.config.format).format_search(&payload))
    }

    /// Executes an image search for the image file at `path`.
    pub async fn execute_image(&self, path: &Path, limit: u32, offset: u32) -> Result<String> {
        let client = EbayClient::new(&self.config.ebay);
        self.execute_image_with_client(&client, path, limit, offset).await
    }

    /// Executes the image search with a provided client (for testing).
    pub async fn execute_image_with_client(
        &self,
        client: &impl MarketplaceSearch,
        path: &Path,
        limit: u32,
        offset: u32,
    ) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        let image = general_purpose::STANDARD.encode(bytes);

        let response = client
            .search_by_image(&image, limit, offset)
            .await
            .context("eBay image search failed")?;

        let payload = SearchPayload::from_response(&response);
        info!("Found {} items ({} total)", payload.items.len(), payload.total);

        Ok(Formatter::new(self.config.format).format_search(&payload))
    }
}
