//! Response classification.
//!
//! The canonical labels are the ones shown in charts (`"Yes"`, `"No"`,
//! `"Not applicable"`). Parsing is lenient so rows written by the free-text
//! schema variant (`"yes"`, `"N/A"`, `"not_applicable"`, ...) still load.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// Closed answer set for a compliance question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
pub enum ResponseType {
    #[serde(rename = "Yes")]
    Yes,
    #[serde(rename = "No")]
    No,
    #[serde(rename = "Not applicable")]
    NotApplicable,
}

impl ResponseType {
    /// All classifications in chart order.
    pub const ALL: [Self; 3] = [Self::Yes, Self::No, Self::NotApplicable];

    /// Canonical label, also used as the SQL storage value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NotApplicable => "Not applicable",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | '-' => ' ',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            "not applicable" | "n/a" | "na" => Ok(Self::NotApplicable),
            _ => Err(CoreError::Validation(format!(
                "unknown response classification '{s}' (expected Yes, No or Not applicable)"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ResponseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
