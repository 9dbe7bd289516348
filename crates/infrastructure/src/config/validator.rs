use anyhow::{bail, Result};
use domain::config::*;
use tracing::warn;

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &AppConfig) -> Result<()> {
        self.validate_logging_config(&config.logging)?;
        self.validate_repository_config(&config.repository)?;
        Ok(())
    }

    fn validate_logging_config(&self, config: &LoggingSettings) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&config.level.to_lowercase().as_str()) {
            bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                config.level,
                VALID_LOG_LEVELS
            );
        }

        if config.json && config.color {
            warn!("Color output is ignored for JSON logs");
        }

        Ok(())
    }

    fn validate_repository_config(&self, config: &RepositoryConfig) -> Result<()> {
        if config.capacity == Some(0) {
            bail!("Repository capacity must be greater than 0");
        }

        if config.max_value_length == 0 {
            bail!("Repository max_value_length must be greater than 0");
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
