//! Service configuration.
//!
//! Read from a YAML file when one is present, with single fields overridable
//! through environment variables:
//!
//! ```yaml
//! anchor_date: "2023-10-02"
//! data_directory: "data"
//! bind_address: "127.0.0.1:3000"
//! allowed_origin: "http://localhost:8080"
//! log_level: "info"
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_VAR: &str = "PAYER_ROTATION_CONFIG";
pub const DATA_DIR_VAR: &str = "PAYER_ROTATION_DATA_DIR";
pub const BIND_VAR: &str = "PAYER_ROTATION_BIND";
pub const DEFAULT_CONFIG_FILE: &str = "payer_rotation.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// First day of the rotation; history is replayed from here
    pub anchor_date: NaiveDate,
    /// Directory holding members.csv
    pub data_directory: PathBuf,
    pub bind_address: String,
    /// Origin allowed to call the API from a browser
    pub allowed_origin: String,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            anchor_date: NaiveDate::from_ymd_opt(2023, 10, 2).unwrap_or_default(),
            data_directory: PathBuf::from("data"),
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the environment.
    ///
    /// Uses the file named by `PAYER_ROTATION_CONFIG` (which must exist), else
    /// `payer_rotation.yaml` in the working directory if present, else the
    /// defaults. Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to load config at {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ServiceConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PAYER_ROTATION_DATA_DIR` and `PAYER_ROTATION_BIND` from `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_directory) = lookup(DATA_DIR_VAR) {
            self.data_directory = PathBuf::from(data_directory);
        }
        if let Some(bind_address) = lookup(BIND_VAR) {
            self.bind_address = bind_address;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("invalid bind address: {}", self.bind_address))
    }

    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.data_directory.as_os_str().is_empty() {
            anyhow::bail!("data_directory cannot be empty");
        }
        Ok(())
    }
}
