//! Router for the bar routes

use super::handlers::{
    AppState, add_to_tab, category, close_tab, download_report, home, leaderboard,
    remove_from_tab, select_customer, settings, settings_add, settings_delete_customer, view_tab,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the bar routes
///
/// - GET / - Categories and open tabs with totals
/// - GET /category/{category} - Drinks in a category
/// - GET /select_customer/{category}/{drink_name}/{price} - Pick a customer for a drink
/// - POST /add_to_tab - Put a drink on a tab
/// - GET /tab/{name} - One customer's tab
/// - POST /remove_from_tab/{name}/{index} - Remove one item
/// - POST /close_tab/{name} - Empty a tab, keep the customer
/// - GET /leaderboard - Customers by number of drinks
/// - GET /settings - Customers and categories
/// - POST /settings/add - Add a customer, category or drink
/// - POST /settings/delete_customer - Forget a customer
/// - GET /report.pdf - Revenue per customer as PDF
pub fn build_bar_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/category/{category}", get(category))
        .route(
            "/select_customer/{category}/{drink_name}/{price}",
            get(select_customer),
        )
        .route("/add_to_tab", post(add_to_tab))
        .route("/tab/{name}", get(view_tab))
        .route("/remove_from_tab/{name}/{index}", post(remove_from_tab))
        .route("/close_tab/{name}", post(close_tab))
        .route("/leaderboard", get(leaderboard))
        .route("/settings", get(settings))
        .route("/settings/add", post(settings_add))
        .route("/settings/delete_customer", post(settings_delete_customer))
        .route("/report.pdf", get(download_report))
        .with_state(state)
}
