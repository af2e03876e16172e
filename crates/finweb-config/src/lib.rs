//! Configuration management for finweb
//!
//! This module handles loading, validation, and management of
//! finweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the finance app
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Subcategory endpoint, `{id}` is replaced with the category id
    #[serde(default = "default_subcategories_path")]
    pub subcategories_path: String,
    /// Request timeout in seconds (none by default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            subcategories_path: default_subcategories_path(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_subcategories_path() -> String {
    "/api/subcategorias/{id}".to_string()
}

/// Texts shown inside the dependent select
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Placeholder while a request is in flight
    #[serde(default = "default_loading_label")]
    pub loading: String,
    /// Leading entry of a loaded list
    #[serde(default = "default_select_label")]
    pub select: String,
    /// Placeholder when no parent is chosen
    #[serde(default = "default_choose_parent_label")]
    pub choose_parent: String,
    /// Placeholder after a failed load
    #[serde(default = "default_error_label")]
    pub error: String,
    /// Message handed to the notifier on failure
    #[serde(default = "default_error_notification")]
    pub error_notification: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            loading: default_loading_label(),
            select: default_select_label(),
            choose_parent: default_choose_parent_label(),
            error: default_error_label(),
            error_notification: default_error_notification(),
        }
    }
}

fn default_loading_label() -> String {
    "Carregando...".to_string()
}

fn default_select_label() -> String {
    "Selecione...".to_string()
}

fn default_choose_parent_label() -> String {
    "Selecione uma categoria primeiro".to_string()
}

fn default_error_label() -> String {
    "Erro ao carregar".to_string()
}

fn default_error_notification() -> String {
    "Erro ao carregar subcategorias".to_string()
}

/// How completions of overlapping loads on one control are resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RacePolicy {
    /// Whichever response completes last is displayed
    LastArrival,
    /// Only the most recently issued request may write the control
    LatestIssued,
}

impl Default for RacePolicy {
    fn default() -> Self {
        RacePolicy::LastArrival
    }
}

impl std::str::FromStr for RacePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_arrival" => Ok(RacePolicy::LastArrival),
            "latest_issued" => Ok(RacePolicy::LatestIssued),
            _ => Err(format!("Invalid race policy: {}", s)),
        }
    }
}

impl std::fmt::Display for RacePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RacePolicy::LastArrival => write!(f, "last_arrival"),
            RacePolicy::LatestIssued => write!(f, "latest_issued"),
        }
    }
}

/// Loader behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoaderConfig {
    /// Stale response handling
    #[serde(default)]
    pub race_policy: RacePolicy,
    /// Keep the control disabled after a failed load
    #[serde(default = "default_false")]
    pub disable_on_error: bool,
}

fn default_false() -> bool {
    false
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
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

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Select labels
    #[serde(default)]
    pub labels: LabelsConfig,
    /// Loader behaviour
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if !self.api.subcategories_path.contains("{id}") {
            return Err(ConfigError::InvalidValue {
                field: "api.subcategories_path".to_string(),
                reason: "Path must contain the {id} placeholder".to_string(),
            });
        }

        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0 when set".to_string(),
            });
        }

        let labels = [
            ("labels.loading", &self.labels.loading),
            ("labels.select", &self.labels.select),
            ("labels.choose_parent", &self.labels.choose_parent),
            ("labels.error", &self.labels.error),
            ("labels.error_notification", &self.labels.error_notification),
        ];
        for (field, value) in labels {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "Label must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full URL of the subcategory endpoint for an already-encoded id
    pub fn subcategories_url(&self, encoded_id: &str) -> String {
        format!(
            "{}{}",
            self.api.base_url.trim_end_matches('/'),
            self.api.subcategories_path.replace("{id}", encoded_id)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.subcategories_path, "/api/subcategorias/{id}");
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.loader.race_policy, RacePolicy::LastArrival);
        assert!(!config.loader.disable_on_error);
        assert_eq!(config.labels.loading, "Carregando...");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundled_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.labels.select, "Selecione...");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "loader:\n  race_policy: latest_issued\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.loader.race_policy, RacePolicy::LatestIssued);
        assert_eq!(config.labels.error, "Erro ao carregar");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("api: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_validate_rejects_missing_placeholder() {
        let mut config = Config::default();
        config.api.subcategories_path = "/api/subcategorias".to_string();
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "api.subcategories_path")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_blank_label() {
        let mut config = Config::default();
        config.api.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.labels.loading = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_subcategories_url() {
        let mut config = Config::default();
        config.api.base_url = "http://localhost:8080/".to_string();
        assert_eq!(
            config.subcategories_url("7"),
            "http://localhost:8080/api/subcategorias/7"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(PathBuf::from("/nonexistent/finweb.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_race_policy_from_str() {
        assert_eq!("latest-issued".parse::<RacePolicy>(), Ok(RacePolicy::LatestIssued));
        assert_eq!(RacePolicy::LastArrival.to_string(), "last_arrival");
        assert!("newest".parse::<RacePolicy>().is_err());
    }
}
