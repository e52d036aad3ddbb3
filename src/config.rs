//! Configuration management with TOML, environment variables, and CLI overrides.
//!
//! Credentials live in the per-integration sections and are handed to each
//! client at construction. Nothing here validates them: a client checks the
//! credential it needs when an operation runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const ENV_EBAY_APP_ID: &str = "EBAY_PROD_APP_ID";
pub const ENV_EBAY_CERT_ID: &str = "EBAY_PROD_CERT_ID";
pub const ENV_PAGE_ACCESS_TOKEN: &str = "FB_PAGE_ACCESS_TOKEN";
pub const ENV_SCRAPEOPS_API_KEY: &str = "SCRAPEOPS_API_KEY";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// eBay Browse API settings
    #[serde(default)]
    pub ebay: EbayConfig,

    /// Messenger Send API settings
    #[serde(default)]
    pub messenger: MessengerConfig,

    /// Sold-listings scraping settings
    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Credentials and endpoints for the eBay Browse API.
#[derive(Clone, Serialize, Deserialize)]
pub struct EbayConfig {
    /// Production application id (OAuth client id)
    #[serde(default)]
    pub app_id: Option<String>,

    /// Production cert id (OAuth client secret)
    #[serde(default)]
    pub cert_id: Option<String>,

    #[serde(default = "default_ebay_api_base")]
    pub api_base: String,

    /// Value of the X-EBAY-C-MARKETPLACE-ID header
    #[serde(default = "default_marketplace_id")]
    pub marketplace_id: String,

    /// OAuth scope requested with the client-credentials grant
    #[serde(default = "default_scope")]
    pub scope: String,
}

fn default_ebay_api_base() -> String {
    "https://api.ebay.com".to_string()
}

fn default_marketplace_id() -> String {
    "EBAY_US".to_string()
}

fn default_scope() -> String {
    "https://api.ebay.com/oauth/api_scope".to_string()
}

impl Default for EbayConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            cert_id: None,
            api_base: default_ebay_api_base(),
            marketplace_id: default_marketplace_id(),
            scope: default_scope(),
        }
    }
}

impl fmt::Debug for EbayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EbayConfig")
            .field("app_id", &self.app_id)
            .field("cert_id", &redacted(&self.cert_id))
            .field("api_base", &self.api_base)
            .field("marketplace_id", &self.marketplace_id)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Page token and Graph API endpoint for Messenger.
#[derive(Clone, Serialize, Deserialize)]
pub struct MessengerConfig {
    #[serde(default)]
    pub page_access_token: Option<String>,

    #[serde(default = "default_graph_base")]
    pub graph_base: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_graph_base() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v20.0".to_string()
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            page_access_token: None,
            graph_base: default_graph_base(),
            api_version: default_api_version(),
        }
    }
}

impl fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessengerConfig")
            .field("page_access_token", &redacted(&self.page_access_token))
            .field("graph_base", &self.graph_base)
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// ScrapeOps proxy key and the pages it renders.
#[derive(Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_proxy_base")]
    pub proxy_base: String,

    /// Site whose sold-listings search page is rendered through the proxy
    #[serde(default = "default_target_base")]
    pub target_base: String,

    /// Rendering a full results page is slow, so this is well above the API timeouts
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_proxy_base() -> String {
    "https://proxy.scrapeops.io".to_string()
}

fn default_target_base() -> String {
    "https://www.ebay.com".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            proxy_base: default_proxy_base(),
            target_base: default_target_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for ScrapeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrapeConfig")
            .field("api_key", &redacted(&self.api_key))
            .field("proxy_base", &self.proxy_base)
            .field("target_base", &self.target_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("sanbi.toml");
        if local_config.exists() {
            debug!("Found sanbi.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("sanbi").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Empty values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Some(app_id) = env_value(ENV_EBAY_APP_ID) {
            self.ebay.app_id = Some(app_id);
        }

        if let Some(cert_id) = env_value(ENV_EBAY_CERT_ID) {
            self.ebay.cert_id = Some(cert_id);
        }

        if let Some(token) = env_value(ENV_PAGE_ACCESS_TOKEN) {
            self.messenger.page_access_token = Some(token);
        }

        if let Some(key) = env_value(ENV_SCRAPEOPS_API_KEY) {
            self.scrape.api_key = Some(key);
        }

        self
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: table, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests touching process env must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ebay.app_id.is_none());
        assert_eq!(config.ebay.api_base, "https://api.ebay.com");
        assert_eq!(config.ebay.marketplace_id, "EBAY_US");
        assert_eq!(config.messenger.api_version, "v20.0");
        assert_eq!(config.scrape.timeout_secs, 120);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            format = "json"

            [ebay]
            app_id = "app-123"
            cert_id = "cert-456"

            [scrape]
            timeout_secs = 60
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.ebay.app_id.as_deref(), Some("app-123"));
        assert_eq!(config.ebay.cert_id.as_deref(), Some("cert-456"));
        // Unset fields in a present section keep their defaults
        assert_eq!(config.ebay.marketplace_id, "EBAY_US");
        assert_eq!(config.scrape.timeout_secs, 60);
        assert_eq!(config.scrape.proxy_base, "https://proxy.scrapeops.io");
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/sanbi.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [messenger]
            api_version = "v21.0"
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.messenger.api_version, "v21.0");
        assert_eq!(config.messenger.graph_base, "https://graph.facebook.com");
    }

    #[test]
    fn test_config_with_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        let names = [ENV_EBAY_APP_ID, ENV_EBAY_CERT_ID, ENV_PAGE_ACCESS_TOKEN, ENV_SCRAPEOPS_API_KEY];
        let originals: Vec<_> = names.iter().map(|n| std::env::var(n).ok()).collect();

        std::env::set_var(ENV_EBAY_APP_ID, "env-app");
        std::env::set_var(ENV_EBAY_CERT_ID, "env-cert");
        std::env::set_var(ENV_PAGE_ACCESS_TOKEN, "env-page-token");
        std::env::set_var(ENV_SCRAPEOPS_API_KEY, "");

        let config = Config::new().with_env();
        assert_eq!(config.ebay.app_id.as_deref(), Some("env-app"));
        assert_eq!(config.ebay.cert_id.as_deref(), Some("env-cert"));
        assert_eq!(config.messenger.page_access_token.as_deref(), Some("env-page-token"));
        // Empty values are ignored
        assert!(config.scrape.api_key.is_none());

        for (name, original) in names.iter().zip(originals) {
            match original {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Config::default();
        config.ebay.cert_id = Some("super-secret-cert".to_string());
        config.messenger.page_access_token = Some("EAAG-page-token".to_string());
        config.scrape.api_key = Some("scrapeops-key".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-cert"));
        assert!(!debug.contains("EAAG-page-token"));
        assert!(!debug.contains("scrapeops-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.ebay.app_id = Some("app".to_string());
        config.format = OutputFormat::Json;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.ebay.app_id, config.ebay.app_id);
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.scrape.timeout_secs, config.scrape.timeout_secs);
    }
}
