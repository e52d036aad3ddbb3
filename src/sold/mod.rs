//! eBay sold-listings scraping through a rendering proxy.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{sold_listings_url, SoldListingsClient, SoldPriceSource};
pub use models::{PriceSummary, ScrapeOutcome};
pub use parser::parse_sold_prices;
