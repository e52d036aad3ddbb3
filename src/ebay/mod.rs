//! eBay Browse API: OAuth token exchange plus keyword and image search.

pub mod client;
pub mod models;

pub use client::{EbayClient, MarketplaceSearch};
pub use models::{ItemSummary, KeywordSearch, PriceFilter, SearchPayload};
