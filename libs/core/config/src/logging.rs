use crate::{env_or_default, ConfigError, FromEnv};

/// Configuration for the application log pipeline.
///
/// `min_level` is kept as a plain string here; the observability crate parses
/// it into its level type when the logger is built at startup.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub min_level: String,
}

impl LoggingConfig {
    pub fn new(min_level: impl Into<String>) -> Self {
        Self {
            min_level: min_level.into(),
        }
    }
}

impl FromEnv for LoggingConfig {
    /// Reads LOG_MIN_LEVEL, defaulting to "information"
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            min_level: env_or_default("LOG_MIN_LEVEL", "information"),
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            min_level: "information".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default_level() {
        temp_env::with_var_unset("LOG_MIN_LEVEL", || {
            let config = LoggingConfig::from_env().unwrap();
            assert_eq!(config.min_level, "information");
        });
    }

    #[test]
    fn test_logging_config_custom_level() {
        temp_env::with_var("LOG_MIN_LEVEL", Some("warning"), || {
            let config = LoggingConfig::from_env().unwrap();
            assert_eq!(config.min_level, "warning");
        });
    }
}
