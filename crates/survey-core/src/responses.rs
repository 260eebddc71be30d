//! JSON shapes returned by the HTTP API.
//!
//! Entities that serialize as-is are returned directly. The types here exist
//! where the wire shape differs from the entity.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Response;
use crate::enums::ResponseType;

/// A stored response as returned by `/responses`.
///
/// Carries the classification under both field names so clients written
/// against either schema variant keep working.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResponseRecord {
    pub id: i64,
    pub organization_id: i64,
    pub clause_id: i64,
    pub question_id: i64,
    pub response_type: ResponseType,
    pub response_text: ResponseType,
    pub comment: Option<String>,
    pub date: NaiveDate,
}

impl From<Response> for ResponseRecord {
    fn from(r: Response) -> Self {
        Self {
            id: r.id,
            organization_id: r.organization_id,
            clause_id: r.clause_id,
            question_id: r.question_id,
            response_type: r.response_type,
            response_text: r.response_type,
            comment: r.comment,
            date: r.date,
        }
    }
}

/// One row of `GET /compare`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompareRecord {
    pub organization_id: i64,
    pub clause_id: i64,
    pub question_id: i64,
    pub response_text: ResponseType,
    pub date: NaiveDate,
}

impl From<&Response> for CompareRecord {
    fn from(r: &Response) -> Self {
        Self {
            organization_id: r.organization_id,
            clause_id: r.clause_id,
            question_id: r.question_id,
            response_text: r.response_type,
            date: r.date,
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}
