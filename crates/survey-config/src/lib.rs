//! # survey-config
//!
//! Layered configuration loading for the survey backend using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SURVEY_*` prefix, `__` as separator)
//! 2. `GEMINI_API_KEY` (bare fallback for `gemini.api_key`)
//! 3. An explicit config file, or `./survey.toml`
//! 4. User-level `~/.config/survey/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SURVEY_GEMINI__API_KEY` -> `gemini.api_key`,
//! `SURVEY_SERVER__PORT` -> `server.port`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use survey_config::SurveyConfig;
//!
//! let config = SurveyConfig::load_with_dotenv().expect("config");
//! if !config.gemini.is_configured() {
//!     eprintln!("AI comparison disabled");
//! }
//! ```

mod database;
mod error;
mod gemini;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "survey.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SurveyConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl SurveyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(None))
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration using `path` in place of `./survey.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_figment(&Self::figment(Some(path)))
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Explicit or project-local config
        let local_path = config_file.map_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE), Path::to_path_buf);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Bare credential variable
        figment = figment.merge(
            Env::raw()
                .only(&["GEMINI_API_KEY"])
                .map(|_| "gemini.api_key".into()),
        );

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("SURVEY_").split("__"))
    }

    /// Extract and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later at runtime.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::invalid("gemini.timeout_secs", "must be greater than zero"));
        }
        if self.gemini.is_configured() && self.gemini.model.trim().is_empty() {
            return Err(ConfigError::invalid("gemini.model", "must be set when an API key is configured"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("survey").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = SurveyConfig::default();
        assert!(!config.gemini.is_configured());
        assert_eq!(config.database.path, "survey.db");
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = SurveyConfig::default();
        config.gemini.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "gemini.timeout_secs"));
    }

    #[test]
    fn empty_database_path_is_rejected() {
        let mut config = SurveyConfig::default();
        config.database.path = String::new();
        assert!(config.validate().is_err());
    }
}
