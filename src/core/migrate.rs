//! Bring a raw persisted document up to the current [`BarState`] shape
//!
//! Two fixes are applied on every load:
//!
//! - **Legacy menu**: early documents stored the menu as a flat list of
//!   drinks. Such a list is wrapped under a single category. This is the only
//!   change that needs to be written back, and [`Upgraded::migrated`] says so.
//! - **Price normalization**: prices written as strings or integers are
//!   coerced to `f64`. A missing price counts as zero.

use super::error::StorageError;
use super::state::BarState;
use serde_json::{Map, Number, Value};

/// Category that receives the drinks of a legacy list-shaped menu
pub const DEFAULT_LEGACY_CATEGORY: &str = "Overig";

/// Result of [`upgrade`]
#[derive(Debug, Clone, PartialEq)]
pub struct Upgraded {
    pub state: BarState,
    /// The document's shape changed and should be persisted again
    pub migrated: bool,
}

/// Turn a raw document into a canonical [`BarState`]
pub fn upgrade(raw: Value, legacy_category: &str) -> Result<Upgraded, StorageError> {
    let Value::Object(mut doc) = raw else {
        return Err(StorageError::Corrupt(
            "top-level value is not an object".to_string(),
        ));
    };

    let mut migrated = false;
    if let Some(Value::Array(drinks)) = doc.get_mut("menu") {
        let drinks = std::mem::take(drinks);
        tracing::warn!(
            category = legacy_category,
            drinks = drinks.len(),
            "migrating list-shaped menu"
        );
        let mut menu = Map::new();
        menu.insert(legacy_category.to_string(), Value::Array(drinks));
        doc.insert("menu".to_string(), Value::Object(menu));
        migrated = true;
    }

    for section in ["menu", "tabs"] {
        if matches!(doc.get(section), None | Some(Value::Null)) {
            doc.insert(section.to_string(), Value::Object(Map::new()));
            continue;
        }
        match doc.get_mut(section) {
            Some(Value::Object(groups)) => {
                for (group, entries) in groups.iter_mut() {
                    let Value::Array(entries) = entries else {
                        return Err(StorageError::Corrupt(format!(
                            "{section}.{group} is not a list"
                        )));
                    };
                    for entry in entries.iter_mut() {
                        normalize_price(entry, section, group)?;
                    }
                }
            }
            _ => {
                return Err(StorageError::Corrupt(format!("{section} is not a mapping")));
            }
        }
    }

    let state: BarState = serde_json::from_value(Value::Object(doc))
        .map_err(|e| StorageError::Corrupt(e.to_string()))?;

    Ok(Upgraded { state, migrated })
}

fn normalize_price(entry: &mut Value, section: &str, group: &str) -> Result<(), StorageError> {
    let Value::Object(fields) = entry else {
        return Err(StorageError::Corrupt(format!(
            "{section}.{group} contains a non-object entry"
        )));
    };

    let price = match fields.get("price") {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or_else(|_| {
            tracing::warn!(section, group = %group, value = %s, "unparseable price, using 0");
            0.0
        }),
        Some(other) => {
            tracing::warn!(section, group = %group, value = %other, "non-numeric price, using 0");
            0.0
        }
    };
    let price = if price.is_finite() { price } else { 0.0 };

    let number = Number::from_f64(price).unwrap_or_else(|| Number::from(0));
    fields.insert("price".to_string(), Value::Number(number));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{Drink, LineItem};
    use serde_json::json;

    #[test]
    fn test_legacy_menu_is_wrapped() {
        let raw = json!({
            "menu": [{"name": "Pils", "price": 2.5}, {"name": "Cola", "price": 2.0}],
            "tabs": {}
        });

        let upgraded = upgrade(raw, DEFAULT_LEGACY_CATEGORY).unwrap();
        assert!(upgraded.migrated);
        assert_eq!(upgraded.state.menu.len(), 1);
        assert_eq!(
            upgraded.state.drinks("Overig"),
            &[Drink::new("Pils", 2.5), Drink::new("Cola", 2.0)]
        );
    }

    #[test]
    fn test_mapping_menu_is_not_migrated() {
        let raw = json!({
            "menu": {"Bier": [{"name": "Pils", "price": 2.5}]},
            "tabs": {"Alex": []}
        });

        let upgraded = upgrade(raw, DEFAULT_LEGACY_CATEGORY).unwrap();
        assert!(!upgraded.migrated);
        assert_eq!(upgraded.state.drinks("Bier"), &[Drink::new("Pils", 2.5)]);
        assert!(upgraded.state.tab("Alex").is_empty());
    }

    #[test]
    fn test_missing_sections_become_empty() {
        let upgraded = upgrade(json!({}), DEFAULT_LEGACY_CATEGORY).unwrap();
        assert_eq!(upgraded.state, BarState::new());
        assert!(!upgraded.migrated);

        let upgraded = upgrade(json!({"menu": null, "tabs": null}), "x").unwrap();
        assert_eq!(upgraded.state, BarState::new());
    }

    #[test]
    fn test_prices_are_coerced_to_float() {
        let raw = json!({
            "menu": {"Bier": [{"name": "Pils", "price": "2.50"}]},
            "tabs": {
                "Alex": [
                    {"name": "Pils", "price": 3},
                    {"name": "Cola", "price": " 2.25 "},
                    {"name": "Water"},
                    {"name": "Wijn", "price": "gratis"},
                    {"name": "Shot", "price": true}
                ]
            }
        });

        let state = upgrade(raw, DEFAULT_LEGACY_CATEGORY).unwrap().state;
        assert_eq!(state.drinks("Bier")[0].price, 2.5);
        let prices: Vec<f64> = state.tab("Alex").iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![3.0, 2.25, 0.0, 0.0, 0.0]);
        assert_eq!(state.tab("Alex")[0], LineItem::new("Pils", 3.0));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let raw: Value = serde_json::from_str(
            r#"{"menu": {"Wijn": [], "Bier": []}, "tabs": {"Zoe": [], "Alex": []}}"#,
        )
        .unwrap();

        let state = upgrade(raw, DEFAULT_LEGACY_CATEGORY).unwrap().state;
        assert_eq!(state.categories().collect::<Vec<_>>(), vec!["Wijn", "Bier"]);
        assert_eq!(state.customers().collect::<Vec<_>>(), vec!["Zoe", "Alex"]);
    }

    #[test]
    fn test_corrupt_documents_are_rejected() {
        assert!(matches!(
            upgrade(json!([1, 2, 3]), "x"),
            Err(StorageError::Corrupt(_))
        ));
        assert!(matches!(
            upgrade(json!({"tabs": "Alex"}), "x"),
            Err(StorageError::Corrupt(_))
        ));
        assert!(matches!(
            upgrade(json!({"tabs": {"Alex": {"name": "Pils"}}}), "x"),
            Err(StorageError::Corrupt(_))
        ));
        assert!(matches!(
            upgrade(json!({"tabs": {"Alex": [{"price": 1.0}]}}), "x"),
            Err(StorageError::Corrupt(_))
        ));
    }
}
