//! Core module: the bar state, its operations, and the persistence port

pub mod error;
pub mod form;
pub mod migrate;
pub mod report;
pub mod service;
pub mod state;
pub mod store;

pub use error::{BarTabError, Rejection, ReportError, Severity, StorageError};
pub use form::AddToTab;
pub use report::{LeaderboardEntry, RevenueRow, RevenueSummary, TabSummary};
pub use service::BarService;
pub use state::{BarState, Drink, LineItem};
pub use store::StateStore;
