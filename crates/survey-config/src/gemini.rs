//! Gemini generative text configuration.

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key. Empty means the narrative comparison is disabled.
    #[serde(default)]
    pub api_key: String,

    /// Model name, e.g. `gemini-1.5-flash`.
    #[serde(default = "default_model")]
    pub model: String,

    /// REST API root, overridable for tests and proxies.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Check if an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = GeminiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn configured_when_key_set() {
        let config = GeminiConfig {
            api_key: "AIza-test".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn blank_key_is_not_configured() {
        let config = GeminiConfig {
            api_key: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
