//! CSS selectors for eBay sold-listings search pages.
//!
//! eBay has migrated its results markup from `s-item` to `s-card` classes and
//! both still show up depending on the page variant served, sometimes on the
//! same page. Each element is described by an ordered chain of selectors:
//! listing cards are the union of every variant in document order, while
//! inside a card the first variant that matches wins.
//!
//! **Update process**: when a scrape comes back empty, capture the HTML,
//! append the new variant to the relevant chain, and add a test fixture.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::trace;

/// Ordered fallback selectors for one logical element.
pub struct SelectorChain {
    name: &'static str,
    strategies: Vec<Selector>,
    /// Selector list matching any strategy
    any: Selector,
}

impl SelectorChain {
    /// Builds a chain from selector strings, most current markup first.
    ///
    /// Panics on an invalid selector; chains are static and covered by tests.
    pub fn new(name: &'static str, selectors: &[&str]) -> Self {
        let strategies = selectors
            .iter()
            .map(|s| {
                Selector::parse(s).unwrap_or_else(|e| panic!("invalid {} selector {:?}: {:?}", name, s, e))
            })
            .collect();

        let joined = selectors.join(", ");
        let any = Selector::parse(&joined)
            .unwrap_or_else(|e| panic!("invalid {} selector {:?}: {:?}", name, joined, e));

        Self { name, strategies, any }
    }

    /// Elements matching any strategy, in document order, each once.
    pub fn select_all<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let found: Vec<_> = document.select(&self.any).collect();
        trace!("{}: matched {} elements", self.name, found.len());
        found
    }

    /// First match inside `element`, trying strategies in order.
    pub fn select_first<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.strategies.iter().find_map(|selector| element.select(selector).next())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Listing card container.
pub static LISTING: LazyLock<SelectorChain> =
    LazyLock::new(|| SelectorChain::new("listing", &["li.s-card", "li.s-item"]));

/// Listing title.
pub static TITLE: LazyLock<SelectorChain> = LazyLock::new(|| {
    SelectorChain::new("title", &["div.s-card__title", "div.s-item__title span[role='heading']"])
});

/// Sold price.
pub static PRICE: LazyLock<SelectorChain> =
    LazyLock::new(|| SelectorChain::new("price", &["span.s-card__price", "span.s-item__price"]));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_chains_parse() {
        assert_eq!(LISTING.len(), 2);
        assert_eq!(TITLE.len(), 2);
        assert_eq!(PRICE.len(), 2);
    }

    #[test]
    fn test_select_all_merges_variants_in_document_order() {
        let html = Html::parse_document(
            r#"<ul>
                <li class="s-item">old-1</li>
                <li class="s-card">new</li>
                <li class="s-item">old-2</li>
                <li class="s-card s-item">both</li>
            </ul>"#,
        );

        let texts: Vec<String> =
            LISTING.select_all(&html).iter().map(|c| c.text().collect()).collect();
        assert_eq!(texts, ["old-1", "new", "old-2", "both"]);
    }

    #[test]
    fn test_select_first_prefers_earlier_strategy() {
        let html = Html::parse_document(
            r#"<ul><li class="s-card">
                <span class="s-item__price">$1.00</span>
                <span class="s-card__price">$2.00</span>
            </li></ul>"#,
        );

        let card = LISTING.select_all(&html)[0];
        let price = PRICE.select_first(card).unwrap();
        assert_eq!(price.text().collect::<String>(), "$2.00");
    }

    #[test]
    fn test_falls_back_to_second_strategy() {
        let html = Html::parse_document(r#"<ul><li class="s-item">a</li><li class="s-item">b</li></ul>"#);
        assert_eq!(LISTING.select_all(&html).len(), 2);
    }

    #[test]
    fn test_select_first_within_element() {
        let html = Html::parse_document(
            r#"<ul><li class="s-item">
                <div class="s-item__title"><span role="heading">Old markup title</span></div>
            </li></ul>"#,
        );

        let card = LISTING.select_all(&html)[0];
        let title = TITLE.select_first(card).unwrap();
        assert_eq!(title.text().collect::<String>(), "Old markup title");
    }

    #[test]
    fn test_no_match() {
        let html = Html::parse_document("<p>nothing here</p>");
        assert!(LISTING.select_all(&html).is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid broken selector")]
    fn test_invalid_selector_panics() {
        SelectorChain::new("broken", &["li[[["]);
    }
}
