//! The bar's whole state: the menu and every customer's tab
//!
//! All operations here are pure mutations of an in-memory [`BarState`];
//! loading and saving are the job of a [`StateStore`](super::store::StateStore).

use super::error::Rejection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A drink on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub name: String,
    pub price: f64,
}

impl Drink {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A purchase recorded on a tab
///
/// Copied from the drink at purchase time, so later menu edits do not
/// change what a customer owes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl From<&Drink> for LineItem {
    fn from(drink: &Drink) -> Self {
        Self::new(drink.name.clone(), drink.price)
    }
}

/// Menu and tabs, both keyed by name in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarState {
    #[serde(default)]
    pub menu: IndexMap<String, Vec<Drink>>,

    #[serde(default)]
    pub tabs: IndexMap<String, Vec<LineItem>>,
}

impl BarState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Tabs
    // =========================================================================

    /// Append `quantity` copies of `item` to `customer`'s tab, opening the tab
    /// if needed. Returns the new tab length.
    pub fn add_to_tab(&mut self, customer: &str, item: LineItem, quantity: u32) -> usize {
        let tab = self.tabs.entry(customer.to_string()).or_default();
        tab.extend(std::iter::repeat_n(item, quantity as usize));
        tab.len()
    }

    /// Remove the item at `index`; `None` when the customer or index is unknown
    pub fn remove_item(&mut self, customer: &str, index: usize) -> Option<LineItem> {
        let tab = self.tabs.get_mut(customer)?;
        if index < tab.len() {
            Some(tab.remove(index))
        } else {
            None
        }
    }

    /// Empty a tab but keep the customer. Returns whether the customer exists.
    pub fn close_tab(&mut self, customer: &str) -> bool {
        match self.tabs.get_mut(customer) {
            Some(tab) => {
                tab.clear();
                true
            }
            None => false,
        }
    }

    pub fn tab(&self, customer: &str) -> &[LineItem] {
        self.tabs.get(customer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn customers(&self) -> impl Iterator<Item = &str> {
        self.tabs.keys().map(String::as_str)
    }

    // =========================================================================
    // Customers
    // =========================================================================

    pub fn add_customer(&mut self, name: &str) -> Result<(), Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyCustomerName);
        }
        if self.tabs.contains_key(name) {
            return Err(Rejection::DuplicateCustomer {
                name: name.to_string(),
            });
        }
        self.tabs.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Forget a customer and their tab entirely
    pub fn delete_customer(&mut self, name: &str) -> Result<Vec<LineItem>, Rejection> {
        // shift_remove keeps the remaining customers in insertion order
        self.tabs
            .shift_remove(name)
            .ok_or(Rejection::CustomerNotFound)
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub fn add_category(&mut self, name: &str) -> Result<(), Rejection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyCategoryName);
        }
        if self.menu.contains_key(name) {
            return Err(Rejection::DuplicateCategory {
                name: name.to_string(),
            });
        }
        self.menu.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Add a drink to an existing category. Checks run in form order:
    /// category, then name, then price.
    pub fn add_drink(
        &mut self,
        category: Option<&str>,
        name: &str,
        price: &str,
    ) -> Result<Drink, Rejection> {
        let drinks = category
            .and_then(|c| self.menu.get_mut(c))
            .ok_or(Rejection::UnknownCategory)?;

        let name = name.trim();
        if name.is_empty() {
            return Err(Rejection::EmptyDrinkName);
        }
        let price = super::form::parse_price(price)?;

        let drink = Drink::new(name, price);
        drinks.push(drink.clone());
        Ok(drink)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.menu.keys().map(String::as_str)
    }

    pub fn drinks(&self, category: &str) -> &[Drink] {
        self.menu.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}
