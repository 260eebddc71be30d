//! Response filtering by organization, clause and date range.
//!
//! Filters are conjunctive. An absent filter imposes no constraint, and the
//! date range is inclusive on both ends. The store pushes the same predicate
//! into SQL; [`ResponseFilter::apply`] is the in-memory equivalent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::Response;
use crate::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFilter {
    /// Empty means "any organization".
    #[serde(default)]
    pub organization_ids: Vec<i64>,
    #[serde(default)]
    pub clause_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ResponseFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn organizations(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.organization_ids = ids.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn clause(mut self, clause_id: Option<i64>) -> Self {
        self.clause_id = clause_id;
        self
    }

    #[must_use]
    pub const fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Same clause and date constraints, scoped to a single organization.
    #[must_use]
    pub fn for_organization(&self, organization_id: i64) -> Self {
        Self {
            organization_ids: vec![organization_id],
            ..self.clone()
        }
    }

    /// Reject a range whose end precedes its start.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] when both dates are set and
    /// `end_date < start_date`.
    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end < start => Err(CoreError::InvalidRange { start, end }),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn matches_organization(&self, organization_id: i64) -> bool {
        self.organization_ids.is_empty() || self.organization_ids.contains(&organization_id)
    }

    #[must_use]
    pub fn matches_clause(&self, clause_id: i64) -> bool {
        self.clause_id.is_none_or(|wanted| wanted == clause_id)
    }

    #[must_use]
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| date >= start)
            && self.end_date.is_none_or(|end| date <= end)
    }

    /// Whether `response` satisfies every supplied constraint.
    #[must_use]
    pub fn matches(&self, response: &Response) -> bool {
        self.matches_organization(response.organization_id)
            && self.matches_clause(response.clause_id)
            && self.matches_date(response.date)
    }

    /// The matching subset of `responses`, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] for an inverted date range rather
    /// than an empty result.
    pub fn apply(&self, responses: &[Response]) -> Result<Vec<Response>, CoreError> {
        self.validate()?;
        Ok(responses
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect())
    }
}
