//! # bartab
//!
//! A bar tab tracker: drink purchases on named customer tabs, a menu of
//! categories and priced drinks, running totals, a leaderboard, and a PDF
//! revenue report at the end of the night.
//!
//! All state lives in one JSON document that is loaded and saved whole on
//! every request, behind the [`StateStore`](core::store::StateStore) port.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bartab::prelude::*;
//!
//! let service = BarService::new(InMemoryStateStore::new());
//! service.add_category("Bier").await?;
//! service.add_drink(Some("Bier"), "Pils", "2.50").await?;
//!
//! let order = AddToTab::from_fields(None, Some("Alex"), "Pils", "2.50", Some("3"))?;
//! service.add_to_tab(&order).await?;
//!
//! let board = service.leaderboard().await?; // [("Alex", 3)]
//! ```

pub mod config;
pub mod core;
pub mod report;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AddToTab, BarService, BarState, BarTabError, Drink, LeaderboardEntry, LineItem,
        Rejection, RevenueRow, RevenueSummary, Severity, StateStore, StorageError, TabSummary,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryStateStore, JsonFileStore};

    // === Config ===
    pub use crate::config::{BarTabConfig, ReportConfig};

    // === Report ===
    pub use crate::report::{LayoutOptions, render_revenue_pdf};

    // === Server ===
    pub use crate::server::{ActionResponse, AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
