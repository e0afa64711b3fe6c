//! PDF revenue report
//!
//! [`layout`] decides where every line goes; [`pdf`] draws it.

pub mod layout;
pub mod pdf;

pub use layout::{LayoutOptions, LineKind, Page, PlacedLine};
pub use pdf::render_revenue_pdf;

use crate::config::ReportConfig;

impl LayoutOptions {
    /// Options from the report config, stamped with the generation time
    pub fn from_config(config: &ReportConfig, generated_at: chrono::DateTime<chrono::Local>) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: Some(format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M"))),
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}
