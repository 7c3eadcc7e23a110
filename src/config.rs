//! Configuration file handling.
//!
//! Settings come from `dashboard.toml` (or the file passed with `--config`),
//! with every field defaulted, then command-line overrides on top.

use crate::errors::StartupError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub models: ModelsConfig,

    #[serde(default)]
    pub inputs: InputsConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Blocking worker threads. One keeps the dashboard strictly
    /// request-at-a-time.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            max_workers: default_max_workers(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_max_workers() -> usize {
    1
}

/// Which inference engine reads the model artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// JSON tree ensembles, evaluated in-process.
    #[default]
    Forest,
    /// XGBoost booster files scored through libxgboost. Needs the `xgboost`
    /// cargo feature.
    Xgboost,
}

/// Where the fitted model artifacts live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_price_regressor")]
    pub price_regressor: PathBuf,

    #[serde(default = "default_category_classifier")]
    pub category_classifier: PathBuf,

    /// Column layout the boosters were fitted on. Unused by `forest`, whose
    /// artifacts carry their own vocabulary.
    #[serde(default = "default_feature_layout")]
    pub feature_layout: PathBuf,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            price_regressor: default_price_regressor(),
            category_classifier: default_category_classifier(),
            feature_layout: default_feature_layout(),
        }
    }
}

fn default_price_regressor() -> PathBuf {
    PathBuf::from("models/price_regressor.json")
}

fn default_category_classifier() -> PathBuf {
    PathBuf::from("models/category_classifier.json")
}

fn default_feature_layout() -> PathBuf {
    PathBuf::from("models/feature_layout.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    /// Upper bound of the parking-space slider (6 or 10 depending on the
    /// data the models were fitted on).
    #[serde(default = "default_parking_space_max")]
    pub parking_space_max: u8,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            parking_space_max: default_parking_space_max(),
        }
    }
}

fn default_parking_space_max() -> u8 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_title() -> String {
    "Nigerian House Price Prediction Dashboard".to_string()
}

fn default_currency_symbol() -> String {
    "₦".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let content = fs::read_to_string(path).map_err(|source| StartupError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| StartupError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `dashboard.toml` from the working directory if present.
    pub fn load_default() -> Result<Option<Self>, StartupError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Generate default configuration as a TOML string.
    pub fn default_toml() -> String {
        let header = "# House price dashboard configuration\n\n";
        match toml::to_string_pretty(&Config::default()) {
            Ok(body) => format!("{header}{body}"),
            Err(_) => header.to_string(),
        }
    }
}
