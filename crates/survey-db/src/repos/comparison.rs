//! Comparison scans: raw filtered rows, the global chart and the pairwise chart.
//!
//! Rows are loaded from the store and aggregated by the pure functions in
//! `survey_core::tally`.

use survey_core::filter::ResponseFilter;
use survey_core::responses::CompareRecord;
use survey_core::tally::{ComparisonRow, OrganizationTally, global_tally, pairwise_tally};

use crate::error::DatabaseError;
use crate::service::SurveyService;

impl SurveyService {
    /// Filtered responses in the comparison wire shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRange` for an inverted date range.
    pub async fn compare_responses(
        &self,
        filter: &ResponseFilter,
    ) -> Result<Vec<CompareRecord>, DatabaseError> {
        let responses = self.filter_responses(filter).await?;
        Ok(responses.iter().map(CompareRecord::from).collect())
    }

    /// Yes/No/Not-applicable totals for every organization with at least one
    /// response.
    pub async fn yes_no_chart(&self) -> Result<Vec<OrganizationTally>, DatabaseError> {
        let organizations = self.list_organizations().await?;
        let responses = self.list_responses(None).await?;
        Ok(global_tally(&organizations, &responses))
    }

    /// Distinct-question comparison of two organizations.
    ///
    /// # Errors
    ///
    /// Returns a not-found `CoreError` if either organization is unknown, and
    /// `CoreError::InvalidRange` for an inverted date range.
    pub async fn yes_no_comparison(
        &self,
        first_id: i64,
        second_id: i64,
        filter: &ResponseFilter,
    ) -> Result<Vec<ComparisonRow>, DatabaseError> {
        let first = self.get_organization(first_id).await?;
        let second = self.get_organization(second_id).await?;
        filter.validate()?;

        let scoped = ResponseFilter {
            organization_ids: vec![first.id, second.id],
            ..filter.clone()
        };
        let questions = self.list_questions_in_clause(filter.clause_id).await?;
        let responses = self.filter_responses(&scoped).await?;

        Ok(pairwise_tally(&first, &second, &questions, &responses, &scoped)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{Fixture, day, fixture, test_service};
    use pretty_assertions::assert_eq;
    use survey_core::entities::NewResponse;
    use survey_core::enums::ResponseType;
    use survey_core::errors::CoreError;
    use survey_core::tally::ComparisonCategory;

    async fn record(svc: &SurveyService, fx: &Fixture, org: i64, q: usize, kind: ResponseType, d: u32) {
        svc.create_response(&NewResponse {
            organization_id: org,
            clause_id: fx.questions[q].clause_id,
            question_id: fx.questions[q].id,
            response_type: kind,
            comment: None,
            date: day(d),
        })
        .await
        .unwrap();
    }

    fn row(rows: &[ComparisonRow], category: ComparisonCategory) -> &ComparisonRow {
        rows.iter().find(|r| r.category == category).unwrap()
    }

    #[tokio::test]
    async fn compare_returns_filtered_records() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        record(&svc, &fx, fx.first.id, 0, ResponseType::Yes, 1).await;
        record(&svc, &fx, fx.second.id, 0, ResponseType::No, 2).await;

        let records = svc
            .compare_responses(&ResponseFilter::new().organizations([fx.second.id]))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].organization_id, fx.second.id);
        assert_eq!(records[0].response_text, ResponseType::No);
    }

    #[tokio::test]
    async fn chart_skips_silent_organizations() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        record(&svc, &fx, fx.first.id, 0, ResponseType::Yes, 1).await;
        record(&svc, &fx, fx.first.id, 1, ResponseType::No, 1).await;
        record(&svc, &fx, fx.first.id, 2, ResponseType::NotApplicable, 1).await;

        let chart = svc.yes_no_chart().await.unwrap();
        assert_eq!(chart.len(), 1);
        let tally = &chart[0];
        assert_eq!(tally.name, fx.first.name);
        assert_eq!(tally.total, tally.yes + tally.no + tally.not_applicable);
        assert_eq!(tally.total, 3);
    }

    #[tokio::test]
    async fn pairwise_counts_distinct_questions() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        // Same question answered Yes twice counts once.
        record(&svc, &fx, fx.first.id, 0, ResponseType::Yes, 1).await;
        record(&svc, &fx, fx.first.id, 0, ResponseType::Yes, 2).await;
        record(&svc, &fx, fx.first.id, 1, ResponseType::No, 2).await;
        record(&svc, &fx, fx.second.id, 2, ResponseType::NotApplicable, 3).await;

        let rows = svc
            .yes_no_comparison(fx.first.id, fx.second.id, &ResponseFilter::new())
            .await
            .unwrap();
        assert_eq!(rows.len(), 4);

        let first = fx.first.name.as_str();
        let second = fx.second.name.as_str();
        assert_eq!(row(&rows, ComparisonCategory::Answered(ResponseType::Yes)).count_for(first), Some(1));
        assert_eq!(row(&rows, ComparisonCategory::Answered(ResponseType::No)).count_for(first), Some(1));
        assert_eq!(row(&rows, ComparisonCategory::NoResponse).count_for(first), Some(1));
        assert_eq!(row(&rows, ComparisonCategory::NoResponse).count_for(second), Some(2));
    }

    #[tokio::test]
    async fn pairwise_respects_clause_universe() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        record(&svc, &fx, fx.first.id, 2, ResponseType::Yes, 1).await;

        let clause = Some(fx.questions[2].clause_id);
        let rows = svc
            .yes_no_comparison(fx.first.id, fx.second.id, &ResponseFilter::new().clause(clause))
            .await
            .unwrap();
        // Clause two holds a single question.
        assert_eq!(row(&rows, ComparisonCategory::NoResponse).count_for(&fx.first.name), Some(0));
        assert_eq!(row(&rows, ComparisonCategory::NoResponse).count_for(&fx.second.name), Some(1));
    }

    #[tokio::test]
    async fn unknown_organization_is_not_found() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let err = svc
            .yes_no_comparison(fx.first.id, 404, &ResponseFilter::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let svc = test_service().await;
        let fx = fixture(&svc).await;
        let filter = ResponseFilter::new().between(Some(day(9)), Some(day(2)));
        let err = svc
            .yes_no_comparison(fx.first.id, fx.second.id, &filter)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::InvalidRange { .. })));
    }
}
