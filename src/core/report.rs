//! Read-only aggregations over a [`BarState`]

use super::state::{BarState, LineItem};
use serde::Serialize;

/// One customer with the size and value of their open tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub name: String,
    pub count: usize,
    pub total: f64,
}

/// A row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub count: usize,
}

/// A row of the revenue summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueRow {
    pub name: String,
    pub total: f64,
}

/// Customers ranked by what they spent, plus the grand total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub rows: Vec<RevenueRow>,
    pub grand_total: f64,
}

// f64's Sum starts at -0.0, which would print as "-0.00"
fn add_up(amounts: impl Iterator<Item = f64>) -> f64 {
    amounts.fold(0.0, |acc, x| acc + x)
}

pub fn tab_total(items: &[LineItem]) -> f64 {
    add_up(items.iter().map(|item| item.price))
}

/// Every customer in insertion order
pub fn tab_overview(state: &BarState) -> Vec<TabSummary> {
    state
        .tabs
        .iter()
        .map(|(name, items)| TabSummary {
            name: name.clone(),
            count: items.len(),
            total: tab_total(items),
        })
        .collect()
}

/// Customers by number of items, most first. Ties keep insertion order.
pub fn leaderboard(state: &BarState) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = state
        .tabs
        .iter()
        .map(|(name, items)| LeaderboardEntry {
            name: name.clone(),
            count: items.len(),
        })
        .collect();
    // sort_by is stable
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Customers by total spent, highest first. Ties keep insertion order.
pub fn revenue_summary(state: &BarState) -> RevenueSummary {
    let mut rows: Vec<RevenueRow> = state
        .tabs
        .iter()
        .map(|(name, items)| RevenueRow {
            name: name.clone(),
            total: tab_total(items),
        })
        .collect();
    rows.sort_by(|a, b| b.total.total_cmp(&a.total));

    let grand_total = add_up(rows.iter().map(|row| row.total));
    RevenueSummary { rows, grand_total }
}

/// `"€ 7.50"` style amount
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}
