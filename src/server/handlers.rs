//! HTTP handlers
//!
//! Pages answer with plain view models for a view layer to render. Mutations
//! answer with an [`ActionResponse`]: a flash message and the page the user
//! should land on next.

use super::forms::{AddToTabForm, DeleteCustomerForm, SettingsAction, SettingsForm};
use crate::config::BarTabConfig;
use crate::core::error::{BarTabError, Severity};
use crate::core::form::AddToTab;
use crate::core::report::{self, LeaderboardEntry, TabSummary};
use crate::core::service::BarService;
use crate::core::state::Drink;
use crate::report::{LayoutOptions, render_revenue_pdf};
use axum::{
    Form, Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BarService>,
    pub config: Arc<BarTabConfig>,
}

type HandlerResult<T> = Result<Json<T>, BarTabError>;

// =============================================================================
// Responses
// =============================================================================

/// One-line message for the user
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub level: Severity,
    pub message: String,
}

/// Result of a mutation
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    /// Page to show next
    pub redirect_to: String,
    /// Whether the stored state changed
    pub changed: bool,
}

impl ActionResponse {
    fn flash(level: Severity, message: String, redirect_to: &str) -> Self {
        Self {
            flash: Some(Flash { level, message }),
            redirect_to: redirect_to.to_string(),
            changed: true,
        }
    }

    fn unchanged(mut self) -> Self {
        self.changed = false;
        self
    }
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub categories: Vec<String>,
    pub tabs: Vec<TabSummary>,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category: String,
    pub drinks: Vec<Drink>,
}

#[derive(Debug, Serialize)]
pub struct SelectCustomerView {
    pub category: String,
    pub drink_name: String,
    pub price: String,
    pub customers: Vec<String>,
}

/// A line item with the index used to remove it
#[derive(Debug, Serialize)]
pub struct TabLine {
    pub index: usize,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct TabView {
    pub name: String,
    pub items: Vec<TabLine>,
    pub total: f64,
    pub menu: IndexMap<String, Vec<Drink>>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardView {
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub customers: Vec<String>,
    pub categories: Vec<String>,
}

/// Characters that cannot appear raw in one path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn tab_path(name: &str) -> String {
    format!("/tab/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

// =============================================================================
// Pages
// =============================================================================

pub async fn home(State(state): State<AppState>) -> HandlerResult<HomeView> {
    let snapshot = state.service.snapshot().await?;
    Ok(Json(HomeView {
        categories: snapshot.categories().map(str::to_string).collect(),
        tabs: report::tab_overview(&snapshot),
    }))
}

pub async fn category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> HandlerResult<CategoryView> {
    let snapshot = state.service.snapshot().await?;
    let drinks = snapshot.drinks(&category).to_vec();
    Ok(Json(CategoryView { category, drinks }))
}

pub async fn select_customer(
    State(state): State<AppState>,
    Path((category, drink_name, price)): Path<(String, String, String)>,
) -> HandlerResult<SelectCustomerView> {
    let snapshot = state.service.snapshot().await?;
    Ok(Json(SelectCustomerView {
        category,
        drink_name,
        price,
        customers: snapshot.customers().map(str::to_string).collect(),
    }))
}

pub async fn view_tab(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<TabView> {
    let snapshot = state.service.snapshot().await?;
    let tab = snapshot.tab(&name);
    let items = tab
        .iter()
        .enumerate()
        .map(|(index, item)| TabLine {
            index,
            name: item.name.clone(),
            price: item.price,
        })
        .collect();
    let total = report::tab_total(tab);

    Ok(Json(TabView {
        name,
        items,
        total,
        menu: snapshot.menu.clone(),
    }))
}

pub async fn leaderboard(State(state): State<AppState>) -> HandlerResult<LeaderboardView> {
    Ok(Json(LeaderboardView {
        leaderboard: state.service.leaderboard().await?,
    }))
}

pub async fn settings(State(state): State<AppState>) -> HandlerResult<SettingsView> {
    let snapshot = state.service.snapshot().await?;
    Ok(Json(SettingsView {
        customers: snapshot.customers().map(str::to_string).collect(),
        categories: snapshot.categories().map(str::to_string).collect(),
    }))
}

// =============================================================================
// Tab mutations
// =============================================================================

pub async fn add_to_tab(
    State(state): State<AppState>,
    Form(form): Form<AddToTabForm>,
) -> HandlerResult<ActionResponse> {
    let req = AddToTab::from_fields(
        form.existing_name.as_deref(),
        form.new_name.as_deref(),
        &form.item_name,
        &form.item_price,
        form.amount.as_deref(),
    )?;
    state.service.add_to_tab(&req).await?;

    Ok(Json(ActionResponse::flash(
        Severity::Success,
        format!("{}x {} added to {}", req.quantity, req.item.name, req.customer),
        "/",
    )))
}

pub async fn remove_from_tab(
    State(state): State<AppState>,
    Path((name, index)): Path<(String, usize)>,
) -> HandlerResult<ActionResponse> {
    let removed = state.service.remove_item(&name, index).await?;
    Ok(Json(ActionResponse {
        flash: None,
        redirect_to: tab_path(&name),
        changed: removed.is_some(),
    }))
}

pub async fn close_tab(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<ActionResponse> {
    let closed = state.service.close_tab(&name).await?;
    let response = ActionResponse::flash(
        Severity::Info,
        format!("Tab of {} closed (customer stays in the system)", name),
        "/",
    );
    Ok(Json(if closed { response } else { response.unchanged() }))
}

// =============================================================================
// Settings
// =============================================================================

pub async fn settings_add(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> HandlerResult<ActionResponse> {
    let message = match form.action()? {
        SettingsAction::AddCustomer { name } => {
            let name = state.service.add_customer(name).await?;
            format!("Customer '{}' added.", name)
        }
        SettingsAction::AddCategory { name } => {
            let name = state.service.add_category(name).await?;
            format!("Category '{}' added.", name)
        }
        SettingsAction::AddDrink {
            category,
            name,
            price,
        } => {
            let drink = state.service.add_drink(category, name, price).await?;
            format!(
                "Drink '{}' added to '{}'.",
                drink.name,
                category.unwrap_or_default()
            )
        }
    };

    Ok(Json(ActionResponse::flash(
        Severity::Success,
        message,
        "/settings",
    )))
}

pub async fn settings_delete_customer(
    State(state): State<AppState>,
    Form(form): Form<DeleteCustomerForm>,
) -> HandlerResult<ActionResponse> {
    let name = form.customer_to_delete.unwrap_or_default();
    state.service.delete_customer(&name).await?;

    Ok(Json(ActionResponse::flash(
        Severity::Success,
        format!("Customer '{}' has been removed.", name),
        "/settings",
    )))
}

// =============================================================================
// Report
// =============================================================================

pub async fn download_report(State(state): State<AppState>) -> Result<Response, BarTabError> {
    let summary = state.service.revenue_summary().await?;
    let options = LayoutOptions::from_config(&state.config.report, chrono::Local::now());
    let bytes = render_revenue_pdf(&summary, &options)?;

    tracing::info!(
        customers = summary.rows.len(),
        grand_total = summary.grand_total,
        "revenue report downloaded"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", state.config.report.file_name),
        ),
    ];
    Ok((headers, bytes).into_response())
}
