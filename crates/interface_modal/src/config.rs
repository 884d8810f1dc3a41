//! Modal configuration

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ModalError;

/// Modal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModalConfig {
    /// strftime pattern for dates shown in the details view
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl ModalConfig {
    /// Loads configuration from `MODAL_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be deserialized or the date
    /// format is not a valid strftime pattern.
    pub fn from_env() -> Result<Self, ModalError> {
        Self::load(config::Environment::with_prefix("MODAL"))
    }

    /// Loads and validates configuration from a single source
    pub fn load<S>(source: S) -> Result<Self, ModalError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the date format parses
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(config::ConfigError::Message(format!(
                "invalid date_format: {}",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Formats a date for display
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}
