//! Integration tests for the sold-listings parser using fixture files.

use sanbi::sold::parser::parse_sold_prices;
use sanbi::sold::PriceSummary;

const SOLD_FIXTURE: &str = include_str!("fixtures/sold_results.html");

#[test]
fn test_parse_sold_results() {
    let prices = parse_sold_prices(SOLD_FIXTURE);

    // House ad and the $0.00 listing are dropped, ranges keep their low end
    assert_eq!(prices, vec![1234.56, 45.0, 12.0]);
}

#[test]
fn test_summary_of_fixture() {
    let prices = parse_sold_prices(SOLD_FIXTURE);
    let summary = PriceSummary::from_prices(&prices).unwrap();

    assert_eq!(summary.count, 3);
    assert_eq!(summary.min, 12.0);
    assert_eq!(summary.max, 1234.56);
    assert_eq!(summary.median, 45.0);
}

#[test]
fn test_legacy_item_markup() {
    let html = r#"
        <html><body><ul class="srp-results">
            <li class="s-item">
                <div class="s-item__title"><span role="heading">Shop on eBay</span></div>
                <span class="s-item__price">$20.00</span>
            </li>
            <li class="s-item">
                <div class="s-item__title"><span role="heading">Old Markup Widget</span></div>
                <span class="s-item__price">$2,500.00</span>
            </li>
        </ul></body></html>
    "#;

    assert_eq!(parse_sold_prices(html), vec![2500.0]);
}

#[test]
fn test_mixed_card_and_item_markup() {
    let html = r#"
        <html><body><ul class="srp-results">
            <li class="s-item">
                <div class="s-item__title"><span role="heading">Old Widget</span></div>
                <span class="s-item__price">$25.00</span>
            </li>
            <li class="s-card">
                <div class="s-card__title"><span>New Widget</span></div>
                <span class="s-card__price">$10.00</span>
            </li>
            <li class="s-card">
                <div class="s-card__title"><span>Shop on eBay</span></div>
                <span class="s-card__price">$20.00</span>
            </li>
            <li class="s-item">
                <div class="s-item__title"><span role="heading">Widget Pair</span></div>
                <span class="s-item__price">$1,100.00</span>
            </li>
        </ul></body></html>
    "#;

    assert_eq!(parse_sold_prices(html), vec![25.0, 10.0, 1100.0]);
}

#[test]
fn test_no_results_page() {
    let html = r#"
        <html>
        <body>
            <div class="srp-save-null-search">No exact matches found</div>
        </body>
        </html>
    "#;

    assert!(parse_sold_prices(html).is_empty());
}
