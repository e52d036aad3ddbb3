//! Scrape outcomes and sold-price statistics.

use serde::Serialize;

/// Result of a best-effort scrape. Failures never escape as errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeOutcome {
    /// Page fetched and parsed; may be empty if nothing sold.
    Prices(Vec<f64>),
    /// No request was made (missing proxy key).
    Skipped(String),
    /// Fetch or parse failed.
    Failed(String),
}

impl ScrapeOutcome {
    /// Scraped prices; empty unless the scrape succeeded.
    pub fn prices(&self) -> &[f64] {
        match self {
            ScrapeOutcome::Prices(prices) => prices,
            _ => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeOutcome::Prices(_))
    }
}

/// Summary statistics over a list of sold prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl PriceSummary {
    /// Returns None for an empty list.
    pub fn from_prices(prices: &[f64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }

        let mut sorted = prices.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 { (sorted[mid - 1] + sorted[mid]) / 2.0 } else { sorted[mid] };

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sorted.iter().sum::<f64>() / count as f64,
            median,
        })
    }
}
