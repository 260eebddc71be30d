//! Shared test utilities for survey-db tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;
    use survey_core::entities::{NewClause, NewOrganization, NewQuestion, Organization, Question};

    use crate::service::SurveyService;

    /// Create an in-memory `SurveyService`.
    pub async fn test_service() -> SurveyService {
        SurveyService::new_local(":memory:").await.unwrap()
    }

    pub fn new_org(name: &str) -> NewOrganization {
        NewOrganization {
            name: name.into(),
            year_of_association: 2020,
            details: None,
        }
    }

    pub fn new_clause(name: &str) -> NewClause {
        NewClause {
            name: name.into(),
            title: None,
        }
    }

    /// A day in January 2024.
    pub fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    /// Two organizations and three questions: two under the first clause,
    /// one under the second.
    pub struct Fixture {
        pub first: Organization,
        pub second: Organization,
        pub questions: Vec<Question>,
    }

    pub async fn fixture(svc: &SurveyService) -> Fixture {
        let first = svc.create_organization(&new_org("Org A")).await.unwrap();
        let second = svc.create_organization(&new_org("Org B")).await.unwrap();
        let one = svc.create_clause(&new_clause("clause_one")).await.unwrap();
        let two = svc.create_clause(&new_clause("clause_two")).await.unwrap();

        let mut questions = Vec::new();
        for (text, clause_id) in [("q1", one.id), ("q2", one.id), ("q3", two.id)] {
            let question = svc
                .create_question(&NewQuestion {
                    text: text.into(),
                    title: None,
                    clause_id,
                })
                .await
                .unwrap();
            questions.push(question);
        }

        Fixture {
            first,
            second,
            questions,
        }
    }
}
