//! Form bodies accepted by the mutating endpoints
//!
//! Field names match the HTML forms a view layer posts.

use crate::core::error::Rejection;
use serde::Deserialize;

/// `POST /add_to_tab`
#[derive(Debug, Clone, Deserialize)]
pub struct AddToTabForm {
    /// Customer picked from the list; wins over `new_name` when non-empty
    #[serde(default)]
    pub existing_name: Option<String>,
    #[serde(default)]
    pub new_name: Option<String>,
    pub item_name: String,
    pub item_price: String,
    /// How many; anything unusable counts as one, too many is refused
    #[serde(default)]
    pub amount: Option<String>,
}

/// `POST /settings/add`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub new_customer: Option<String>,
    #[serde(default)]
    pub new_category: Option<String>,
    #[serde(default)]
    pub category_select: Option<String>,
    #[serde(default)]
    pub drink_name: Option<String>,
    #[serde(default)]
    pub drink_price: Option<String>,
}

/// `POST /settings/delete_customer`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCustomerForm {
    #[serde(default)]
    pub customer_to_delete: Option<String>,
}

/// What a settings submission asks for
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction<'a> {
    AddCustomer {
        name: &'a str,
    },
    AddCategory {
        name: &'a str,
    },
    AddDrink {
        category: Option<&'a str>,
        name: &'a str,
        price: &'a str,
    },
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

impl SettingsForm {
    /// Pick the action named by the `action` field
    pub fn action(&self) -> Result<SettingsAction<'_>, Rejection> {
        match self.action.as_deref() {
            Some("add_customer") => Ok(SettingsAction::AddCustomer {
                name: field(&self.new_customer),
            }),
            Some("add_category") => Ok(SettingsAction::AddCategory {
                name: field(&self.new_category),
            }),
            Some("add_drink") => Ok(SettingsAction::AddDrink {
                category: self.category_select.as_deref().filter(|c| !c.is_empty()),
                name: field(&self.drink_name),
                price: field(&self.drink_price),
            }),
            other => Err(Rejection::UnknownAction {
                action: other.unwrap_or_default().to_string(),
            }),
        }
    }
}
