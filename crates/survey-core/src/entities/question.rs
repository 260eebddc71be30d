use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A compliance question. Belongs to exactly one clause.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub title: String,
    pub clause_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    /// Falls back to `text` when omitted.
    #[serde(default)]
    pub title: Option<String>,
    pub clause_id: i64,
}

impl NewQuestion {
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.text)
    }
}
