use super::{get_config_dir, FinanceConfig};
use crate::error::{ErrorCode, FinanceError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Loads [`FinanceConfig`]: defaults, then `config.toml`, then environment
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader reading `config.toml` from the user config directory
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Loader reading an explicit file, which must exist
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub async fn load(&self) -> Result<FinanceConfig> {
        self.load_with_env(|key| std::env::var(key).ok()).await
    }

    /// Like [`load`](Self::load), reading overrides from `lookup`
    pub async fn load_with_env<F>(&self, lookup: F) -> Result<FinanceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.path {
            Some(path) => Self::read_file(path).await?,
            None => {
                let default_path = get_config_dir()?.join("config.toml");
                if fs::try_exists(&default_path).await.unwrap_or(false) {
                    Self::read_file(&default_path).await?
                } else {
                    debug!(path = %default_path.display(), "No config file, using defaults");
                    FinanceConfig::default()
                }
            }
        };

        config.merge_env_from(lookup);
        config.validate()?;
        Ok(config)
    }

    async fn read_file(path: &Path) -> Result<FinanceConfig> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            let code = if e.kind() == std::io::ErrorKind::NotFound {
                ErrorCode::CONFIG_NOT_FOUND
            } else {
                ErrorCode::CONFIG_GENERIC
            };
            FinanceError::config_with_code(code, format!("Cannot read {}", path.display()))
                .with_source(e)
        })?;

        debug!(path = %path.display(), "Loaded finance config");
        let config = toml::from_str::<FinanceConfig>(&content)
            .map_err(|e| FinanceError::from(e).with_context(path.display()))?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
