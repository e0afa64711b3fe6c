//! REST exposure: bar routes, health checks and request tracing

use super::handlers::AppState;
use super::router::build_bar_routes;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

pub struct RestExposure;

impl RestExposure {
    /// Build the full router from the shared state
    ///
    /// Returns an Axum router with:
    /// - Health check routes
    /// - Bar routes
    /// - Custom routes
    /// - An HTTP trace layer over all of them
    pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(build_bar_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(TraceLayer::new_for_http())
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "bartab"
        }))
    }
}
