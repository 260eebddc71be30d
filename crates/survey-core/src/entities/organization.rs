use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A surveyed organization. Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub year_of_association: i32,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub year_of_association: i32,
    #[serde(default)]
    pub details: Option<String>,
}
