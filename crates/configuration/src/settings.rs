use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub farm: FarmSettings,
    pub logging: LoggingSettings,
}

/// Farm-wide constants used by the calculators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FarmSettings {
    /// Estimated feed price per kg used for harvest profit (R$ 5 unless overridden).
    pub feed_cost_per_kg: Decimal,
    /// ISO code shown next to money amounts.
    pub currency: String,
}

impl Default for FarmSettings {
    fn default() -> Self {
        Self {
            feed_cost_per_kg: dec!(5),
            currency: "BRL".to_string(),
        }
    }
}

/// Output format of the console log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. "info" or "analytics=debug". `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            directory: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.farm.feed_cost_per_kg < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "farm.feed_cost_per_kg cannot be negative (got {})",
                self.farm.feed_cost_per_kg
            )));
        }
        if self.farm.currency.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "farm.currency cannot be empty".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.farm.feed_cost_per_kg, dec!(5));
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_feed_cost_is_rejected() {
        let mut config = Config::default();
        config.farm.feed_cost_per_kg = dec!(-0.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn blank_level_is_rejected() {
        let mut config = Config::default();
        config.logging.level = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
