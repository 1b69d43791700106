//! Parsing of free-text user input.

/// Parse a purchase price typed by the user.
///
/// Blank, non-numeric and non-finite input all mean "no purchase price".
/// Zero and negative numbers parse; profit is disabled for them downstream.
///
/// # Example
///
/// ```rust
/// use etf_range_core::parse_purchase_price;
///
/// assert_eq!(parse_purchase_price(" 600 "), Some(600.0));
/// assert_eq!(parse_purchase_price(""), None);
/// assert_eq!(parse_purchase_price("six hundred"), None);
/// ```
pub fn parse_purchase_price(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|price| price.is_finite())
}
