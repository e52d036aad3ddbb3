//! HTTP client for the eBay OAuth and Browse APIs.

use crate::config::EbayConfig;
use crate::ebay::models::KeywordSearch;
use crate::error::EbayError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::{Client, Response};

const TOKEN_PATH: &str = "/identity/v1/oauth2/token";
const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";
const SEARCH_BY_IMAGE_PATH: &str = "/buy/browse/v1/item_summary/search_by_image";

/// Trait for marketplace searches - enables mocking for tests.
#[async_trait]
pub trait MarketplaceSearch: Send + Sync {
    /// Keyword search. Returns the Browse API response untouched.
    async fn search_by_keyword(&self, search: &KeywordSearch) -> Result<Value, EbayError>;

    /// Image search with a base64-encoded image.
    async fn search_by_image(
        &self,
        image_base64: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Value, EbayError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// eBay Browse API client.
///
/// Every search exchanges the client credentials for a fresh application
/// token first; tokens are never reused between calls. Each request opens its
/// own HTTP client, so no connections outlive the call.
pub struct EbayClient {
    config: EbayConfig,
}

impl EbayClient {
    /// Creates a client for the given settings. Credentials are checked per call.
    pub fn new(config: &EbayConfig) -> Self {
        Self { config: config.clone() }
    }

    fn http(&self) -> Result<Client, EbayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(client)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    /// `Basic` credential value for the token endpoint.
    fn basic_credentials(&self) -> Result<String, EbayError> {
        let app_id = self
            .config
            .app_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EbayError::Configuration("EBAY_PROD_APP_ID is not set".into()))?;
        let cert_id = self
            .config
            .cert_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| EbayError::Configuration("EBAY_PROD_CERT_ID is not set".into()))?;

        Ok(general_purpose::STANDARD.encode(format!("{}:{}", app_id, cert_id)))
    }

    /// Obtains an application access token via the client-credentials grant.
    pub async fn get_token(&self) -> Result<String, EbayError> {
        let credentials = self.basic_credentials()?;
        let url = self.url(TOKEN_PATH);
        let body = format!(
            "grant_type=client_credentials&scope={}",
            urlencoding::encode(&self.config.scope)
        );

        debug!("POST {}", url);

        let response = self
            .http()?
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Authorization", format!("Basic {}", credentials))
            .body(body)
            .send()
            .await?;

        let json = read_json(response, "token").await?;
        let token: TokenResponse = serde_json::from_value(json)?;

        token.access_token.filter(|t| !t.is_empty()).ok_or(EbayError::MissingToken)
    }
}

#[async_trait]
impl MarketplaceSearch for EbayClient {
    async fn search_by_keyword(&self, search: &KeywordSearch) -> Result<Value, EbayError> {
        let token = self.get_token().await?;
        let url = format!("{}?{}", self.url(SEARCH_PATH), search.query_string());

        info!("Searching eBay: {} (limit {}, offset {})", search.query, search.limit, search.offset);
        debug!("GET {}", url);

        let response = self
            .http()?
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("X-EBAY-C-MARKETPLACE-ID", self.config.marketplace_id.as_str())
            .send()
            .await?;

        read_json(response, "keyword search").await
    }

    async fn search_by_image(
        &self,
        image_base64: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Value, EbayError> {
        let token = self.get_token().await?;
        let url = format!("{}?limit={}&offset={}", self.url(SEARCH_BY_IMAGE_PATH), limit, offset);
        let body = serde_json::to_string(&serde_json::json!({ "image": image_base64 }))?;

        info!("Searching eBay by image ({} base64 bytes)", image_base64.len());
        debug!("POST {}", url);

        let response = self
            .http()?
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("X-EBAY-C-MARKETPLACE-ID", self.config.marketplace_id.as_str())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        read_json(response, "image search").await
    }
}

/// Reads a response body, mapping non-2xx statuses to `EbayError::Upstream`.
async fn read_json(response: Response, operation: &str) -> Result<Value, EbayError> {
    let status = response.status();
    debug!("Response status: {}", status);

    let body = response.text().await?;

    if !status.is_success() {
        warn!("eBay {} failed: {}\n{}", operation, status, body);
        return Err(EbayError::Upstream { status: status.as_u16(), body });
    }

    Ok(serde_json::from_str(&body)?)
}
