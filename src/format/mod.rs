//! Output formatting for search results, sold prices and send outcomes (table, JSON).

use crate::config::OutputFormat;
use crate::ebay::SearchPayload;
use crate::messenger::SendOutcome;
use crate::sold::{PriceSummary, ScrapeOutcome};
use serde_json::json;

/// Formats command results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a summarised Browse API search.
    pub fn format_search(&self, payload: &SearchPayload) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table if payload.is_empty() => "No items found.".to_string(),
            OutputFormat::Table => self.table_search(payload),
        }
    }

    /// Formats sold prices for `term` with their summary.
    pub fn format_sold(&self, term: &str, outcome: &ScrapeOutcome) -> String {
        let summary = PriceSummary::from_prices(outcome.prices());

        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "term": term,
                    "prices": outcome.prices(),
                    "summary": summary,
                    "outcome": outcome,
                });
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => self.table_sold(term, outcome, summary.as_ref()),
        }
    }

    /// Formats the result of a Messenger send.
    pub fn format_send(&self, outcome: &SendOutcome) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => match outcome {
                SendOutcome::Sent { response } => {
                    let id = response.get("message_id").and_then(|v| v.as_str()).unwrap_or("-");
                    format!("Sent (message id: {})", id)
                }
                SendOutcome::Skipped { reason } => format!("Not sent: {}", reason),
                SendOutcome::Failed { status: Some(status), body } => {
                    format!("Not sent: HTTP {}\n{}", status, body)
                }
                SendOutcome::Failed { status: None, body } => format!("Not sent: {}", body),
            },
        }
    }

    // Table formatting

    fn table_search(&self, payload: &SearchPayload) -> String {
        let price_width = 10;
        let title_width = 60;

        let mut lines = Vec::new();

        lines.push(format!("{:>price_width$}  {:<title_width$}  {}", "Price", "Title", "URL"));
        lines.push(format!("{:-<price_width$}  {:-<title_width$}  {:-<3}", "", "", ""));

        for item in &payload.items {
            let price_str = if item.current_price > 0.0 {
                format!("{:.2}", item.current_price)
            } else {
                "N/A".to_string()
            };

            lines.push(format!(
                "{:>price_width$}  {:<title_width$}  {}",
                price_str,
                truncate(&item.title, title_width),
                item.item_web_url.as_deref().unwrap_or("-")
            ));
        }

        lines.push(String::new());
        lines.push(format!("Showing {} of {} items", payload.items.len(), payload.total));

        lines.join("\n")
    }

    fn table_sold(
        &self,
        term: &str,
        outcome: &ScrapeOutcome,
        summary: Option<&PriceSummary>,
    ) -> String {
        let mut lines = vec![format!("Sold listings for \"{}\"", term)];

        match (outcome, summary) {
            (ScrapeOutcome::Skipped(reason), _) => lines.push(format!("Skipped: {}", reason)),
            (ScrapeOutcome::Failed(reason), _) => lines.push(format!("Scrape failed: {}", reason)),
            (ScrapeOutcome::Prices(_), None) => lines.push("No sold prices found.".to_string()),
            (ScrapeOutcome::Prices(prices), Some(s)) => {
                lines.push(format!("Count:   {}", s.count));
                lines.push(format!("Min:     {:.2}", s.min));
                lines.push(format!("Max:     {:.2}", s.max));
                lines.push(format!("Mean:    {:.2}", s.mean));
                lines.push(format!("Median:  {:.2}", s.median));
                lines.push(String::new());

                let list: Vec<String> = prices.iter().map(|p| format!("{:.2}", p)).collect();
                lines.push(format!("Prices:  {}", list.join(", ")));
            }
        }

        lines.join("\n")
    }
}

/// Truncates to `width` characters with a trailing "...".
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
