//! Console configuration
//!
//! Every field carries a serde default, so a partial (or empty) JSON document
//! is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::projection::{PresetTableKind, DEFAULT_PERIODS, DEFAULT_PRINCIPAL};

/// Environment variable consulted by [`ConsoleConfig::from_env`]
pub const CONFIG_ENV_VAR: &str = "QUANTDESK_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Profit calculator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorSettings {
    /// Upper bound on periods accepted by one projection
    #[serde(default = "default_max_periods")]
    pub max_periods: u32,

    /// Principal the calculator opens with
    #[serde(default = "default_principal")]
    pub default_principal: f64,

    /// Period count the calculator opens with (months)
    #[serde(default = "default_periods")]
    pub default_periods: u32,

    /// Which strategy preset table the calculator offers
    #[serde(default)]
    pub preset_table: PresetTableKind,
}

fn default_max_periods() -> u32 { 600 }
fn default_principal() -> f64 { DEFAULT_PRINCIPAL }
fn default_periods() -> u32 { DEFAULT_PERIODS }

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            max_periods: 600,
            default_principal: DEFAULT_PRINCIPAL,
            default_periods: DEFAULT_PERIODS,
            preset_table: PresetTableKind::default(),
        }
    }
}

/// Admin list page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSettings {
    /// Rows per page when a page opens
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Rows-per-page choices offered to the operator
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,

    /// Fields matched by the search box; empty means every field
    #[serde(default = "default_search_fields")]
    pub search_fields: Vec<String>,
}

fn default_page_size() -> usize { 10 }
fn default_page_size_options() -> Vec<usize> { vec![10, 25, 50] }
fn default_search_fields() -> Vec<String> {
    vec!["username".to_string(), "email".to_string()]
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            search_fields: default_search_fields(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub projector: ProjectorSettings,
    #[serde(default)]
    pub listing: ListingSettings,
}

impl ConsoleConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load from the file named by `QUANTDESK_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                log::info!("loading config from {:?}", path);
                Self::from_path(path)
            }
            None => {
                log::debug!("{} not set, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }
}
