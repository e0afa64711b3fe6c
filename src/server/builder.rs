//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::rest::RestExposure;
use crate::config::BarTabConfig;
use crate::core::service::BarService;
use crate::core::store::StateStore;
use crate::storage::JsonFileStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the bartab HTTP server
///
/// Without an explicit store, the server keeps its state in the JSON file
/// named by the config.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(BarTabConfig::default())
///     .with_state_store(InMemoryStateStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: BarTabConfig,
    store: Option<Arc<dyn StateStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: BarTabConfig::default(),
            store: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: BarTabConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this store instead of the configured JSON file
    pub fn with_state_store(mut self, store: impl StateStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Add routes next to the bar routes
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the state shared by all handlers
    pub fn build_state(&mut self) -> AppState {
        let store = self.store.take().unwrap_or_else(|| {
            Arc::new(
                JsonFileStore::new(self.config.data_file.clone())
                    .with_legacy_category(self.config.legacy_category.clone()),
            )
        });

        AppState {
            service: Arc::new(BarService::from_store(store)),
            config: Arc::new(self.config.clone()),
        }
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state();
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(RestExposure::build_router(state, custom_routes))
    }

    /// Serve on the configured bind address with graceful shutdown
    ///
    /// This will:
    /// - Bind to `bind_addr`
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr.clone();
        let data_file = self.config.data_file.display().to_string();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(data_file = %data_file, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStateStore;

    #[test]
    fn test_build_with_in_memory_store() {
        let result = ServerBuilder::new()
            .with_state_store(InMemoryStateStore::new())
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_state_uses_config() {
        let config = BarTabConfig {
            bind_addr: "127.0.0.1:9999".to_string(),
            ..Default::default()
        };
        let mut builder = ServerBuilder::new().with_config(config.clone());
        let state = builder.build_state();
        assert_eq!(*state.config, config);
    }

    #[test]
    fn test_custom_routes_are_merged() {
        let result = ServerBuilder::new()
            .with_state_store(InMemoryStateStore::new())
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_default_store_is_the_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = BarTabConfig {
            data_file: dir.path().join("bar.json"),
            ..Default::default()
        };
        let state = ServerBuilder::new().with_config(config).build_state();

        state.service.add_customer("Alex").await.unwrap();
        assert!(dir.path().join("bar.json").exists());
    }
}
