//! Configuration loading and management

use crate::core::migrate::DEFAULT_LEGACY_CATEGORY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming a YAML config file
pub const CONFIG_ENV: &str = "BARTAB_CONFIG";
/// Environment override for [`BarTabConfig::data_file`]
pub const DATA_FILE_ENV: &str = "BARTAB_DATA_FILE";
/// Environment override for [`BarTabConfig::bind_addr`]
pub const BIND_ADDR_ENV: &str = "BARTAB_BIND_ADDR";

/// Settings for the PDF revenue report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Bold title at the top of the first page
    pub title: String,

    /// Prefix in front of every amount, e.g. `"€ "` or `"$"`
    pub currency_symbol: String,

    /// File name offered to the browser on download
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Revenue per customer".to_string(),
            currency_symbol: "€ ".to_string(),
            file_name: "bartab-report.pdf".to_string(),
        }
    }
}

/// Complete configuration for a bartab server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarTabConfig {
    /// The JSON document holding menu and tabs
    pub data_file: PathBuf,

    /// Address the HTTP server listens on
    pub bind_addr: String,

    /// Category that receives the drinks of a list-shaped legacy menu
    pub legacy_category: String,

    pub report: ReportConfig,
}

impl Default for BarTabConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data.json"),
            bind_addr: "0.0.0.0:5000".to_string(),
            legacy_category: DEFAULT_LEGACY_CATEGORY.to_string(),
            report: ReportConfig::default(),
        }
    }
}

impl BarTabConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("invalid config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (usually the process environment)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(data_file) = lookup(DATA_FILE_ENV) {
            self.data_file = PathBuf::from(data_file);
        }
        if let Some(bind_addr) = lookup(BIND_ADDR_ENV) {
            self.bind_addr = bind_addr;
        }
        self
    }

    /// Defaults, then the file named by `BARTAB_CONFIG`, then env overrides
    pub fn from_env() -> Result<Self> {
        let config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }
}
