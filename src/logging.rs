//! Tracing subscriber setup for hosts embedding this crate

use crate::config::FinanceConfig;
use crate::error::{ErrorCode, FinanceError, Result};
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count (0 info, 1 debug, 2+ trace)
pub fn filter_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        2 => "trace",
        _ => "trace,hyper=debug,reqwest=debug",
    }
}

/// Install a global fmt subscriber
///
/// `RUST_LOG` takes precedence over `verbosity` when set.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(verbosity)));
    install(filter, verbosity)
}

/// Install a subscriber using `log_level` from configuration
pub fn init_from_config(config: &FinanceConfig) -> Result<()> {
    let level = config.log_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).map_err(|e| {
        FinanceError::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            format!("invalid log_level '{}'", level),
        )
        .with_source(e)
    })?;
    install(filter, 0)
}

fn install(filter: EnvFilter, verbosity: u8) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_thread_ids(verbosity >= 3)
        .with_line_number(verbosity >= 3)
        .try_init()
        .map_err(|e| FinanceError::config(format!("tracing already initialized: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for_verbosity(0), "info");
        assert_eq!(filter_for_verbosity(1), "debug");
        assert_eq!(filter_for_verbosity(2), "trace");
        assert!(filter_for_verbosity(7).starts_with("trace,"));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let config = FinanceConfig {
            log_level: Some("info,pledge_finance=notalevel".to_string()),
            ..FinanceConfig::default()
        };
        let err = init_from_config(&config).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
    }

    #[test]
    fn test_second_init_fails_instead_of_panicking() {
        let _ = init_tracing(0);
        assert!(init_tracing(1).is_err());
    }
}
