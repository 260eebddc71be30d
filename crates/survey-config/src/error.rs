//! Errors raised while loading survey settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer (defaults, `config.toml`, `survey.toml`, environment) could not
    /// be read or merged into [`crate::SurveyConfig`].
    #[error("Failed to load survey configuration: {0}")]
    Load(#[from] figment::Error),

    /// A setting loaded but holds a value the server cannot run with.
    #[error("Invalid survey setting '{field}' (env {env_var}): {reason}")]
    InvalidValue {
        field: String,
        env_var: String,
        reason: String,
    },
}

impl ConfigError {
    /// Invalid value for a dotted `section.key` field, naming the `SURVEY_*`
    /// variable that overrides it.
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_owned(),
            env_var: env_var_for(field),
            reason: reason.to_owned(),
        }
    }
}

/// `gemini.timeout_secs` → `SURVEY_GEMINI__TIMEOUT_SECS`.
fn env_var_for(field: &str) -> String {
    format!("SURVEY_{}", field.replace('.', "__").to_uppercase())
}
