//! sanbi - eBay market lookups, sold-price scraping and Messenger replies
//!
//! Three independent integrations: the eBay Browse API (keyword and image
//! search behind a client-credentials token), the Messenger Send API, and a
//! ScrapeOps-rendered sold-listings scraper. Each has its own error policy:
//! eBay searches return `Result`, Messenger sends return a `SendOutcome`, and
//! scrapes return a `ScrapeOutcome` that degrades to an empty price list.

pub mod commands;
pub mod config;
pub mod ebay;
pub mod error;
pub mod format;
pub mod messenger;
pub mod sold;

pub use config::Config;
pub use ebay::{EbayClient, KeywordSearch, MarketplaceSearch, SearchPayload};
pub use error::EbayError;
pub use messenger::{MessageSender, MessengerClient, SendOutcome};
pub use sold::{ScrapeOutcome, SoldListingsClient, SoldPriceSource};
