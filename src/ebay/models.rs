//! Request and result models for the eBay Browse API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Page size used when the caller does not pick one.
pub const DEFAULT_LIMIT: u32 = 24;

/// Inclusive USD price bounds for a keyword search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceFilter {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Returns true if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Renders the Browse API `filter` parameter value.
    ///
    /// Empty when unbounded; otherwise `price:[min..max],priceCurrency:USD`
    /// with a missing bound left blank inside the brackets.
    pub fn to_param(&self) -> String {
        if self.is_unbounded() {
            return String::new();
        }

        let bound = |b: Option<f64>| b.map(|v| v.to_string()).unwrap_or_default();
        format!("price:[{}..{}],priceCurrency:USD", bound(self.min), bound(self.max))
    }
}

impl fmt::Display for PriceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

/// A keyword search with pagination and optional price bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSearch {
    pub query: String,
    pub limit: u32,
    pub offset: u32,
    pub price: PriceFilter,
}

impl KeywordSearch {
    /// Creates a search with the default page size and no price bounds.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), limit: DEFAULT_LIMIT, offset: 0, price: PriceFilter::default() }
    }

    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price = PriceFilter::new(min, max);
        self
    }

    /// Query string for the search endpoint. `filter` is always present.
    pub fn query_string(&self) -> String {
        format!(
            "q={}&limit={}&offset={}&filter={}",
            urlencoding::encode(&self.query),
            self.limit,
            self.offset,
            urlencoding::encode(&self.price.to_param())
        )
    }
}

/// One listing pulled out of a Browse API `itemSummaries` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub title: String,
    pub image_url: Option<String>,
    /// Listing price; 0.0 when eBay omits it or sends something unparsable
    pub current_price: f64,
    pub item_web_url: Option<String>,
}

impl ItemSummary {
    fn from_value(item: &Value) -> Self {
        let title = item.get("title").and_then(Value::as_str).unwrap_or_default().to_string();

        let image_url = item
            .get("image")
            .and_then(|i| i.get("imageUrl"))
            .and_then(Value::as_str)
            .map(String::from);

        // Browse API sends price.value as a string ("12.99")
        let current_price = item
            .get("price")
            .and_then(|p| p.get("value"))
            .and_then(|v| match v {
                Value::String(s) => s.trim().parse::<f64>().ok(),
                Value::Number(n) => n.as_f64(),
                _ => None,
            })
            .unwrap_or(0.0);

        let item_web_url = item.get("itemWebUrl").and_then(Value::as_str).map(String::from);

        Self { title, image_url, current_price, item_web_url }
    }
}

/// Flattened view of a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub items: Vec<ItemSummary>,
    /// Total matches reported by eBay, not the number of items on this page
    pub total: u64,
}

impl SearchPayload {
    /// Summarises a raw Browse API response. Missing fields become empty values.
    pub fn from_response(response: &Value) -> Self {
        let items = response
            .get("itemSummaries")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().map(ItemSummary::from_value).collect())
            .unwrap_or_default();

        let total = response.get("total").and_then(Value::as_u64).unwrap_or(0);

        Self { items, total }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_filter_unbounded_is_empty() {
        assert_eq!(PriceFilter::new(None, None).to_param(), "");
    }

    #[test]
    fn test_price_filter_min_only() {
        assert_eq!(PriceFilter::new(Some(5.0), None).to_param(), "price:[5..],priceCurrency:USD");
    }

    #[test]
    fn test_price_filter_max_only() {
        assert_eq!(
            PriceFilter::new(None, Some(99.5)).to_param(),
            "price:[..99.5],priceCurrency:USD"
        );
    }

    #[test]
    fn test_price_filter_both_bounds() {
        let filter = PriceFilter::new(Some(10.0), Some(250.0));
        assert_eq!(filter.to_string(), "price:[10..250],priceCurrency:USD");
    }

    #[test]
    fn test_keyword_search_defaults() {
        let search = KeywordSearch::new("widget");
        assert_eq!(search.limit, 24);
        assert_eq!(search.offset, 0);
        assert!(search.price.is_unbounded());
    }

    #[test]
    fn test_query_string_keeps_empty_filter() {
        let search = KeywordSearch::new("widget").page(10, 0);
        assert_eq!(search.query_string(), "q=widget&limit=10&offset=0&filter=");
    }

    #[test]
    fn test_query_string_encodes_filter_and_query() {
        let search = KeywordSearch::new("lego star wars").page(5, 20).price_range(Some(5.0), None);
        let qs = search.query_string();
        assert!(qs.starts_with("q=lego%20star%20wars&limit=5&offset=20&filter="));
        assert!(qs.contains("price%3A%5B5..%5D%2CpriceCurrency%3AUSD"));
    }

    #[test]
    fn test_search_payload_from_response() {
        let response = json!({
            "total": 1532,
            "itemSummaries": [
                {
                    "title": "Vintage Widget",
                    "image": { "imageUrl": "https://i.ebayimg.com/1.jpg" },
                    "price": { "value": "19.99", "currency": "USD" },
                    "itemWebUrl": "https://www.ebay.com/itm/1"
                },
                {
                    "title": "Widget, no price"
                }
            ]
        });

        let payload = SearchPayload::from_response(&response);
        assert_eq!(payload.total, 1532);
        assert_eq!(payload.items.len(), 2);

        let first = &payload.items[0];
        assert_eq!(first.title, "Vintage Widget");
        assert_eq!(first.image_url.as_deref(), Some("https://i.ebayimg.com/1.jpg"));
        assert_eq!(first.current_price, 19.99);
        assert_eq!(first.item_web_url.as_deref(), Some("https://www.ebay.com/itm/1"));

        let second = &payload.items[1];
        assert_eq!(second.current_price, 0.0);
        assert!(second.image_url.is_none());
    }

    #[test]
    fn test_search_payload_without_summaries() {
        let payload = SearchPayload::from_response(&json!({ "href": "..." }));
        assert!(payload.is_empty());
        assert_eq!(payload.total, 0);
    }

    #[test]
    fn test_unparsable_price_is_zero() {
        let payload = SearchPayload::from_response(&json!({
            "itemSummaries": [{ "title": "x", "price": { "value": "N/A" } }]
        }));
        assert_eq!(payload.items[0].current_price, 0.0);
    }
}
