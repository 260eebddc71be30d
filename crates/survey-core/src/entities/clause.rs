use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named grouping of related compliance questions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Clause {
    pub id: i64,
    /// Unique short name, e.g. `access_control`.
    pub name: String,
    /// Display title, e.g. `Access Control & Authentication`.
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewClause {
    pub name: String,
    /// Falls back to `name` when omitted.
    #[serde(default)]
    pub title: Option<String>,
}

impl NewClause {
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}
