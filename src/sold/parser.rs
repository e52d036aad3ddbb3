//! Extracts sold prices from an eBay search results page.

use crate::sold::selectors;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Title eBay gives the promotional card mixed into every results list.
pub const HOUSE_AD_TITLE: &str = "Shop on eBay";

static PRICE_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"\d{1,3}(,\d{3})*(\.\d+)?").expect("price pattern is valid")
});

/// Parses sold prices from results HTML, in page order.
///
/// Cards without a title or price, with a non-positive price, or that are the
/// house ad are skipped.
pub fn parse_sold_prices(html: &str) -> Vec<f64> {
    let document = Html::parse_document(html);
    let cards = selectors::LISTING.select_all(&document);

    let prices: Vec<f64> = cards.into_iter().filter_map(parse_card).collect();

    debug!("Parsed {} sold prices", prices.len());
    prices
}

fn parse_card(card: ElementRef) -> Option<f64> {
    let title = element_text(selectors::TITLE.select_first(card)?);
    let price_text = element_text(selectors::PRICE.select_first(card)?);

    if title.contains(HOUSE_AD_TITLE) {
        trace!("Skipping house ad card");
        return None;
    }

    let price = parse_price(&price_text).filter(|p| *p > 0.0)?;
    trace!("Sold: {} - {}", title, price);
    Some(price)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses the first number in a price string such as "$1,234.56".
pub fn parse_price(text: &str) -> Option<f64> {
    let matched = PRICE_PATTERN.find(text)?;
    matched.as_str().replace(',', "").parse().ok()
}
