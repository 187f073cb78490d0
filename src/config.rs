// ⚙️ Configuration
//
// Defaults → optional TOML file → command-line overrides (applied in main).

use crate::analytics::{DEFAULT_LOW_THRESHOLD, DEFAULT_TOP_N};
use crate::catalog::{DEFAULT_CATALOG_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{Result, SalesError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "sales-analytics.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub catalog_url: String,
    pub catalog_timeout_secs: u64,
    pub top_n: usize,
    pub low_stock_threshold: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            input_path: PathBuf::from("data/sales_data.txt"),
            output_path: PathBuf::from("data/enriched_sales_data.txt"),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_timeout_secs: DEFAULT_TIMEOUT_SECS,
            top_n: DEFAULT_TOP_N,
            low_stock_threshold: DEFAULT_LOW_THRESHOLD,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SalesError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load an explicit config file, or the default one if it exists.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(SalesError::Config("input_path must not be empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(SalesError::Config("output_path must not be empty".to_string()));
        }
        if self.catalog_url.trim().is_empty() {
            return Err(SalesError::Config("catalog_url must not be empty".to_string()));
        }
        if self.catalog_timeout_secs == 0 {
            return Err(SalesError::Config("catalog_timeout_secs must be positive".to_string()));
        }
        if self.top_n == 0 {
            return Err(SalesError::Config("top_n must be positive".to_string()));
        }
        Ok(())
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n, 5);
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.catalog_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            input_path = "sales.txt"
            top_n = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.input_path, PathBuf::from("sales.txt"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.output_path, AppConfig::default().output_path);
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = AppConfig {
            top_n: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(SalesError::Config(_))));

        let config = AppConfig {
            catalog_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        assert!(AppConfig::from_toml_str("top_n = \"five\"").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "low_stock_threshold = 4\ncatalog_timeout_secs = 3\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.low_stock_threshold, 4);
        assert_eq!(config.catalog_timeout_secs, 3);
    }
}
