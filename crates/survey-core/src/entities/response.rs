use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ResponseType;

/// One organization's answer to one question on a given date.
///
/// `clause_id` is stored redundantly with the question's clause; the store
/// rejects writes where the two disagree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Response {
    pub id: i64,
    pub organization_id: i64,
    pub clause_id: i64,
    pub question_id: i64,
    pub response_type: ResponseType,
    pub comment: Option<String>,
    pub date: NaiveDate,
}

/// Creation and full-update payload for a response.
///
/// Accepts the classification under either `response_type` or the older
/// `response_text` field name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewResponse {
    pub organization_id: i64,
    pub clause_id: i64,
    pub question_id: i64,
    #[serde(alias = "response_text")]
    pub response_type: ResponseType,
    #[serde(default)]
    pub comment: Option<String>,
    pub date: NaiveDate,
}

impl NewResponse {
    /// Attach a store-assigned id.
    #[must_use]
    pub fn into_response(self, id: i64) -> Response {
        Response {
            id,
            organization_id: self.organization_id,
            clause_id: self.clause_id,
            question_id: self.question_id,
            response_type: self.response_type,
            comment: self.comment,
            date: self.date,
        }
    }
}
