//! Lenient parsing of submitted form values

use super::error::Rejection;
use super::state::LineItem;
use std::num::IntErrorKind;

/// Most copies of one item a single submission may put on a tab
pub const MAX_QUANTITY: u32 = 100;

/// Parse a price field. Surrounding whitespace is ignored; the value must be a
/// finite, non-negative number.
pub fn parse_price(raw: &str) -> Result<f64, Rejection> {
    let invalid = || Rejection::InvalidPrice {
        value: raw.to_string(),
    };
    let price: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !price.is_finite() || price < 0.0 {
        return Err(invalid());
    }
    Ok(price)
}

/// Parse the "how many" field. Missing, unparseable or below-one values all
/// count as one; anything above [`MAX_QUANTITY`] is refused.
pub fn parse_quantity(raw: Option<&str>) -> Result<u32, Rejection> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    let too_large = || Rejection::QuantityTooLarge {
        value: raw.trim().to_string(),
        max: MAX_QUANTITY,
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n < 1 => Ok(1),
        Ok(n) => u32::try_from(n)
            .ok()
            .filter(|n| *n <= MAX_QUANTITY)
            .ok_or_else(too_large),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(too_large()),
        Err(_) => Ok(1),
    }
}

/// Pick the customer from the select box, falling back to the typed name
pub fn resolve_customer_name(existing: Option<&str>, typed: Option<&str>) -> Option<String> {
    match existing {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => typed
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    }
}

/// A validated "put this on a tab" request
#[derive(Debug, Clone, PartialEq)]
pub struct AddToTab {
    pub customer: String,
    pub item: LineItem,
    pub quantity: u32,
}

impl AddToTab {
    /// Validate the raw form fields of an add-to-tab submission
    pub fn from_fields(
        existing_name: Option<&str>,
        new_name: Option<&str>,
        item_name: &str,
        item_price: &str,
        amount: Option<&str>,
    ) -> Result<Self, Rejection> {
        let customer =
            resolve_customer_name(existing_name, new_name).ok_or(Rejection::MissingCustomerName)?;
        let price = parse_price(item_price)?;

        Ok(Self {
            customer,
            item: LineItem::new(item_name, price),
            quantity: parse_quantity(amount)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("2.50"), Ok(2.5));
        assert_eq!(parse_price(" 3 "), Ok(3.0));
        assert_eq!(parse_price("0"), Ok(0.0));
        assert!(parse_price("").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("-1").is_err());
        assert!(parse_price("inf").is_err());
        assert!(parse_price("NaN").is_err());
    }

    #[test]
    fn test_parse_quantity_falls_back_to_one() {
        assert_eq!(parse_quantity(None), Ok(1));
        assert_eq!(parse_quantity(Some("")), Ok(1));
        assert_eq!(parse_quantity(Some("abc")), Ok(1));
        assert_eq!(parse_quantity(Some("0")), Ok(1));
        assert_eq!(parse_quantity(Some("-4")), Ok(1));
        assert_eq!(parse_quantity(Some("-99999999999999999999")), Ok(1));
        assert_eq!(parse_quantity(Some("2.5")), Ok(1));
        assert_eq!(parse_quantity(Some(" 3 ")), Ok(3));
        assert_eq!(parse_quantity(Some("12")), Ok(12));
    }

    #[test]
    fn test_parse_quantity_is_capped() {
        assert_eq!(parse_quantity(Some("100")), Ok(MAX_QUANTITY));
        for raw in ["101", "4294967295", "4294967296", "99999999999999999999"] {
            assert!(
                matches!(
                    parse_quantity(Some(raw)),
                    Err(Rejection::QuantityTooLarge { max: MAX_QUANTITY, .. })
                ),
                "{raw} should be refused"
            );
        }
        assert!(matches!(
            AddToTab::from_fields(None, Some("Alex"), "Pils", "2.5", Some("4294967295")),
            Err(Rejection::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_existing_customer_wins() {
        assert_eq!(
            resolve_customer_name(Some("Alex"), Some("Sam")),
            Some("Alex".to_string())
        );
        assert_eq!(
            resolve_customer_name(Some(""), Some("  Sam ")),
            Some("Sam".to_string())
        );
        assert_eq!(resolve_customer_name(None, Some("   ")), None);
        assert_eq!(resolve_customer_name(None, None), None);
    }

    #[test]
    fn test_add_to_tab_from_fields() {
        let req = AddToTab::from_fields(None, Some("Alex"), "Pils", "2.50", Some("3")).unwrap();
        assert_eq!(req.customer, "Alex");
        assert_eq!(req.item, LineItem::new("Pils", 2.5));
        assert_eq!(req.quantity, 3);

        assert_eq!(
            AddToTab::from_fields(Some(""), Some(""), "Pils", "2.50", None),
            Err(Rejection::MissingCustomerName)
        );
        assert!(matches!(
            AddToTab::from_fields(None, Some("Alex"), "Pils", "two", None),
            Err(Rejection::InvalidPrice { .. })
        ));
    }
}
