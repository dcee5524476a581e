use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{FinancingError, Result};

/// install the global subscriber; RUST_LOG overrides the configured filter
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from(&config.filter)?,
    };

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).json())
            .try_init(),
    };

    installed.map_err(|e| FinancingError::InvalidConfiguration {
        message: format!("logging already initialized: {}", e),
    })
}

/// parse an env-filter directive
pub fn filter_from(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| FinancingError::InvalidConfiguration {
        message: format!("invalid log filter '{}': {}", directive, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(filter_from(&LoggingConfig::default().filter).is_ok());
        assert!(filter_from("financing_simulator=debug,info").is_ok());
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let err = filter_from("financing_simulator=loudest").unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        // another test binary thread may have won the first install
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }
}
