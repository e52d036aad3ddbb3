//! Sold-price lookup command.

use crate::config::Config;
use crate::format::Formatter;
use crate::sold::{ScrapeOutcome, SoldListingsClient, SoldPriceSource};
use tracing::{debug, info};

/// Scrapes sold prices for a search term.
pub struct SoldCommand {
    config: Config,
}

impl SoldCommand {
    /// Creates a new sold-price command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes and returns the outcome with its formatted output.
    pub async fn execute(&self, term: &str) -> (ScrapeOutcome, String) {
        let client = SoldListingsClient::new(&self.config.scrape);
        self.execute_with_client(&client, term).await
    }

    /// Scrapes with a provided source (for testing).
    pub async fn execute_with_client(
        &self,
        source: &impl SoldPriceSource,
        term: &str,
    ) -> (ScrapeOutcome, String) {
        let outcome = source.scrape_sold_prices(term).await;
        if outcome.is_success() {
            info!("Scraped {} sold prices for '{}'", outcome.prices().len(), term);
        } else {
            debug!("No scrape result for '{}', reporting an empty price list", term);
        }

        let output = Formatter::new(self.config.format).format_sold(term, &outcome);
        (outcome, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use async_trait::async_trait;

    struct FixedSource(ScrapeOutcome);

    #[async_trait]
    impl SoldPriceSource for FixedSource {
        async fn scrape_sold_prices(&self, _search_term: &str) -> ScrapeOutcome {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_sold_summary() {
        let source = FixedSource(ScrapeOutcome::Prices(vec![1234.56, 100.0]));
        let cmd = SoldCommand::new(Config::default());

        let (outcome, output) = cmd.execute_with_client(&source, "vintage widget").await;
        assert_eq!(outcome.prices(), &[1234.56, 100.0]);
        assert!(output.contains("Count:   2"));
        assert!(output.contains("Max:     1234.56"));
    }

    #[tokio::test]
    async fn test_sold_json() {
        let source = FixedSource(ScrapeOutcome::Prices(vec![5.0]));
        let config = Config { format: OutputFormat::Json, ..Config::default() };
        let cmd = SoldCommand::new(config);

        let (_, output) = cmd.execute_with_client(&source, "widget").await;
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["term"], "widget");
        assert_eq!(parsed["summary"]["median"], 5.0);
    }

    #[tokio::test]
    async fn test_missing_key_returns_empty() {
        let cmd = SoldCommand::new(Config::default());
        let (outcome, output) = cmd.execute("widget").await;

        assert!(!outcome.is_success());
        assert!(outcome.prices().is_empty());
        assert!(output.contains("Skipped"));
    }
}
