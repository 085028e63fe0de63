use crate::error::{ErrorCode, FinanceError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub mod loader;

pub use loader::ConfigLoader;

pub const DEFAULT_API_BASE_URL: &str = "https://api.polar.sh";
pub const DEFAULT_PLATFORM: &str = "github";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Get the per-user directory holding `config.toml`
pub fn get_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("sh", "polar", "pledge-finance")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            FinanceError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                "Could not determine home directory",
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    pub api_base_url: String,
    pub platform: String,
    pub request_timeout_secs: u64,
    pub api_token: Option<String>,
    pub log_level: Option<String>,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            api_token: None,
            log_level: Some("info".to_string()),
        }
    }
}

impl FinanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Apply `PLEDGE_FINANCE_*` overrides from an arbitrary lookup
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PLEDGE_FINANCE_API_URL") {
            self.api_base_url = url;
        }

        if let Some(platform) = lookup("PLEDGE_FINANCE_PLATFORM") {
            self.platform = platform;
        }

        if let Some(timeout) = lookup("PLEDGE_FINANCE_TIMEOUT_SECS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.request_timeout_secs = value;
            }
        }

        if let Some(token) = lookup("PLEDGE_FINANCE_API_TOKEN") {
            self.api_token = Some(token).filter(|t| !t.trim().is_empty());
        }

        if let Some(log_level) = lookup("PLEDGE_FINANCE_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api_base_url).map_err(|e| {
            FinanceError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("api_base_url '{}' is not a valid URL", self.api_base_url),
            )
            .with_source(e)
        })
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if url.cannot_be_a_base() {
            return Err(FinanceError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("api_base_url '{}' cannot be used as a base", self.api_base_url),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(FinanceError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "request_timeout_secs must be greater than zero",
            ));
        }

        if self.platform.trim().is_empty() {
            return Err(FinanceError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "platform must not be empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = FinanceConfig::new();
        assert_eq!(config.platform, "github");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FinanceConfig = toml::from_str(
            r#"
api_base_url = "http://localhost:8000"
api_token = "secret"
"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.platform, DEFAULT_PLATFORM);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PLEDGE_FINANCE_API_URL", "http://127.0.0.1:9000"),
            ("PLEDGE_FINANCE_TIMEOUT_SECS", "5"),
            ("PLEDGE_FINANCE_API_TOKEN", "  "),
            ("PLEDGE_FINANCE_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = FinanceConfig::new();
        config.api_token = Some("old".to_string());
        config.merge_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.api_token, None);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.platform, DEFAULT_PLATFORM);
    }

    #[test]
    fn test_invalid_timeout_override_is_ignored() {
        let mut config = FinanceConfig::new();
        config.merge_env_from(|key| {
            (key == "PLEDGE_FINANCE_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FinanceConfig::new();
        config.api_base_url = "not a url".to_string();
        assert_eq!(
            config.validate().unwrap_err().code(),
            ErrorCode::CONFIG_INVALID_VALUE
        );

        let mut config = FinanceConfig::new();
        config.api_base_url = "mailto:finance@example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = FinanceConfig::new();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
