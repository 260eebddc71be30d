//! Response tallies for charts.
//!
//! Two views:
//! - [`global_tally`]: raw Yes/No/Not-applicable counts per organization.
//! - [`pairwise_tally`]: two organizations side by side, counted by distinct
//!   question id, with a `No Response` row derived from the question universe.
//!
//! The pairwise view counts distinct questions, not responses, so duplicate
//! responses to the same question never inflate a category.

use std::collections::HashSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::entities::{Organization, Question, Response};
use crate::enums::ResponseType;
use crate::errors::CoreError;
use crate::filter::ResponseFilter;

// ---------------------------------------------------------------------------
// Global tally
// ---------------------------------------------------------------------------

/// One chart row of `GET /chart-data/yes-no`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationTally {
    pub name: String,
    #[serde(rename = "Yes")]
    pub yes: u32,
    #[serde(rename = "No")]
    pub no: u32,
    #[serde(rename = "Not applicable")]
    pub not_applicable: u32,
    #[serde(rename = "Total")]
    pub total: u32,
}

impl OrganizationTally {
    fn record(&mut self, kind: ResponseType) {
        match kind {
            ResponseType::Yes => self.yes += 1,
            ResponseType::No => self.no += 1,
            ResponseType::NotApplicable => self.not_applicable += 1,
        }
        self.total += 1;
    }
}

/// Count responses by classification for every organization that has any.
///
/// Output follows the order of `organizations`; organizations without a
/// single response are left out.
#[must_use]
pub fn global_tally(organizations: &[Organization], responses: &[Response]) -> Vec<OrganizationTally> {
    organizations
        .iter()
        .filter_map(|org| {
            let mut tally = OrganizationTally {
                name: org.name.clone(),
                yes: 0,
                no: 0,
                not_applicable: 0,
                total: 0,
            };
            for response in responses.iter().filter(|r| r.organization_id == org.id) {
                tally.record(response.response_type);
            }
            (tally.total > 0).then_some(tally)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pairwise tally
// ---------------------------------------------------------------------------

/// Row label of the pairwise comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonCategory {
    Answered(ResponseType),
    NoResponse,
}

impl ComparisonCategory {
    /// Rows in chart order.
    pub const ALL: [Self; 4] = [
        Self::Answered(ResponseType::Yes),
        Self::Answered(ResponseType::No),
        Self::Answered(ResponseType::NotApplicable),
        Self::NoResponse,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Answered(kind) => kind.as_str(),
            Self::NoResponse => "No Response",
        }
    }
}

/// Distinct-question counts for one organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistinctCounts {
    pub yes: u32,
    pub no: u32,
    pub not_applicable: u32,
    /// Distinct questions with at least one matching response.
    pub answered: u32,
    /// `universe - answered`, floored at zero.
    pub no_response: u32,
}

impl DistinctCounts {
    #[must_use]
    pub const fn get(&self, category: ComparisonCategory) -> u32 {
        match category {
            ComparisonCategory::Answered(ResponseType::Yes) => self.yes,
            ComparisonCategory::Answered(ResponseType::No) => self.no,
            ComparisonCategory::Answered(ResponseType::NotApplicable) => self.not_applicable,
            ComparisonCategory::NoResponse => self.no_response,
        }
    }
}

/// Key holding the category label in a serialized [`ComparisonRow`].
///
/// Organization names share the row's key space, so no organization may be
/// named this.
pub const CATEGORY_KEY: &str = "name";

/// Fail with [`CoreError::Validation`] if `name` would collide with
/// [`CATEGORY_KEY`] in a comparison row.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] for the reserved name.
pub fn check_organization_name(name: &str) -> Result<(), CoreError> {
    if name.trim() == CATEGORY_KEY {
        return Err(CoreError::Validation(format!(
            "organization name '{CATEGORY_KEY}' is reserved"
        )));
    }
    Ok(())
}

/// One row of `GET /chart-data/yes-no-comparison`.
///
/// Serializes as `{"name": <category>, <org name>: <count>, ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub category: ComparisonCategory,
    /// `(organization name, count)` in request order.
    pub counts: Vec<(String, u32)>,
}

impl ComparisonRow {
    /// Count recorded for `organization`, if present.
    #[must_use]
    pub fn count_for(&self, organization: &str) -> Option<u32> {
        self.counts
            .iter()
            .find(|(name, _)| name == organization)
            .map(|(_, count)| *count)
    }
}

impl Serialize for ComparisonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len() + 1))?;
        map.serialize_entry(CATEGORY_KEY, self.category.label())?;
        for (name, count) in &self.counts {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Number of distinct questions in scope of the clause filter.
///
/// Organization and date filters do not shrink the universe.
#[must_use]
pub fn universe_size(questions: &[Question], clause_id: Option<i64>) -> u32 {
    let ids: HashSet<i64> = questions
        .iter()
        .filter(|q| clause_id.is_none_or(|c| q.clause_id == c))
        .map(|q| q.id)
        .collect();
    saturating_u32(ids.len())
}

/// Distinct-question counts for one organization under `filter`'s clause and
/// date constraints. The filter's organization list is ignored.
#[must_use]
pub fn distinct_counts(
    organization_id: i64,
    responses: &[Response],
    filter: &ResponseFilter,
    universe: u32,
) -> DistinctCounts {
    let scope = filter.for_organization(organization_id);
    let mut yes = HashSet::new();
    let mut no = HashSet::new();
    let mut not_applicable = HashSet::new();
    let mut answered = HashSet::new();

    for response in responses.iter().filter(|r| scope.matches(r)) {
        answered.insert(response.question_id);
        match response.response_type {
            ResponseType::Yes => yes.insert(response.question_id),
            ResponseType::No => no.insert(response.question_id),
            ResponseType::NotApplicable => not_applicable.insert(response.question_id),
        };
    }

    let answered = saturating_u32(answered.len());
    DistinctCounts {
        yes: saturating_u32(yes.len()),
        no: saturating_u32(no.len()),
        not_applicable: saturating_u32(not_applicable.len()),
        answered,
        no_response: universe.saturating_sub(answered),
    }
}

/// Side-by-side comparison of two organizations.
///
/// Returns four rows (Yes, No, Not applicable, No Response), each keyed by
/// organization name.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRange`] if the filter's date range is inverted,
/// or [`CoreError::Validation`] if an organization carries the reserved
/// [`CATEGORY_KEY`] name.
pub fn pairwise_tally(
    first: &Organization,
    second: &Organization,
    questions: &[Question],
    responses: &[Response],
    filter: &ResponseFilter,
) -> Result<Vec<ComparisonRow>, CoreError> {
    filter.validate()?;
    check_organization_name(&first.name)?;
    check_organization_name(&second.name)?;

    let universe = universe_size(questions, filter.clause_id);
    let first_counts = distinct_counts(first.id, responses, filter, universe);
    let second_counts = distinct_counts(second.id, responses, filter, universe);

    Ok(ComparisonCategory::ALL
        .into_iter()
        .map(|category| {
            let mut counts = vec![(first.name.clone(), first_counts.get(category))];
            if second.id != first.id {
                counts.push((second.name.clone(), second_counts.get(category)));
            }
            ComparisonRow { category, counts }
        })
        .collect())
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
