//! Sample data for local development (`survey seed`).

use chrono::{Days, NaiveDate};
use survey_core::entities::{NewClause, NewOrganization, NewQuestion, NewResponse};
use survey_core::enums::ResponseType;

use crate::error::DatabaseError;
use crate::service::SurveyService;

const ORGANIZATIONS: &[(&str, i32, &str)] = &[
    ("Ministry of Human Rights", 2020, "Federal ministry"),
    ("SECP", 2019, "Securities and Exchange Commission"),
    ("NADRA", 2021, "National Database and Registration Authority"),
    ("Punjab Home Department", 2022, "Provincial department"),
    ("Ministry of Law and Justice", 2020, "Federal ministry"),
    ("PEMRA", 2021, "Pakistan Electronic Media Regulatory Authority"),
    ("KP ST&IT", 2022, "Khyber Pakhtunkhwa Science & Technology"),
    ("Ministry of Religious Affairs", 2020, "Federal ministry"),
    ("Ministry of Communication", 2021, "Federal ministry"),
    ("Ministry of Planning", 2020, "Federal ministry"),
];

/// `(name, title, [(question text, question title)])`
const CLAUSES: &[(&str, &str, [(&str, &str); 3])] = &[
    (
        "cyber_security",
        "Cyber Security Implementation",
        [
            ("Does your organization have a dedicated cyber security team?", "Cyber Security Team"),
            ("Does higher management receive reports from cyber security team?", "Management Reporting"),
            ("Does top management participate in cyber security program?", "Management Participation"),
        ],
    ),
    (
        "data_protection",
        "Data Protection & Privacy",
        [
            ("Has your organization developed data protection policies?", "Data Protection Policies"),
            ("Do you have a comprehensive data inventory?", "Data Inventory"),
            ("Are data protection trainings conducted regularly?", "Data Protection Training"),
        ],
    ),
    (
        "incident_response",
        "Incident Response & Recovery",
        [
            ("Do you have an incident response plan?", "Incident Response Plan"),
            ("Are incident response drills conducted?", "Response Drills"),
            ("Do you have a disaster recovery plan?", "Disaster Recovery"),
        ],
    ),
    (
        "access_control",
        "Access Control & Authentication",
        [
            ("Do you use multi-factor authentication?", "Multi-Factor Auth"),
            ("Are access privileges reviewed regularly?", "Access Review"),
            ("Do you have a password policy?", "Password Policy"),
        ],
    ),
    (
        "risk_assessment",
        "Risk Assessment & Management",
        [
            ("Do you conduct regular risk assessments?", "Risk Assessments"),
            ("Do you have a risk management framework?", "Risk Framework"),
            ("Are risks documented and tracked?", "Risk Documentation"),
        ],
    ),
];

/// Every seventh question is left unanswered so comparisons show gaps.
const SKIP_EVERY: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub organizations: usize,
    pub clauses: usize,
    pub questions: usize,
    pub responses: usize,
}

fn classification(n: usize) -> ResponseType {
    match n % 5 {
        0 | 2 => ResponseType::Yes,
        1 | 3 => ResponseType::No,
        _ => ResponseType::NotApplicable,
    }
}

impl SurveyService {
    /// Populate an empty store with sample organizations, clauses,
    /// questions and responses.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if any organization already
    /// exists.
    pub async fn seed_sample_data(&self, base_date: NaiveDate) -> Result<SeedSummary, DatabaseError> {
        let existing = self.count_organizations().await?;
        if existing > 0 {
            return Err(DatabaseError::InvalidState(format!(
                "refusing to seed: {existing} organizations already exist"
            )));
        }

        let mut summary = SeedSummary::default();

        let mut organizations = Vec::with_capacity(ORGANIZATIONS.len());
        for (name, year, details) in ORGANIZATIONS {
            let org = self
                .create_organization(&NewOrganization {
                    name: (*name).to_string(),
                    year_of_association: *year,
                    details: Some((*details).to_string()),
                })
                .await?;
            organizations.push(org);
        }
        summary.organizations = organizations.len();

        let mut questions = Vec::new();
        for (name, title, items) in CLAUSES {
            let clause = self
                .create_clause(&NewClause {
                    name: (*name).to_string(),
                    title: Some((*title).to_string()),
                })
                .await?;
            summary.clauses += 1;
            for (text, question_title) in items {
                let question = self
                    .create_question(&NewQuestion {
                        text: (*text).to_string(),
                        title: Some((*question_title).to_string()),
                        clause_id: clause.id,
                    })
                    .await?;
                questions.push(question);
            }
        }
        summary.questions = questions.len();

        let mut n = 0usize;
        for org in &organizations {
            for question in &questions {
                n += 1;
                if n % SKIP_EVERY == 0 {
                    continue;
                }
                let date = base_date
                    .checked_add_days(Days::new(u64::try_from(summary.responses).unwrap_or_default()))
                    .unwrap_or(base_date);
                self.create_response(&NewResponse {
                    organization_id: org.id,
                    clause_id: question.clause_id,
                    question_id: question.id,
                    response_type: classification(n),
                    comment: Some(format!("Sample response for {} - {}", org.name, question.title)),
                    date,
                })
                .await?;
                summary.responses += 1;
            }
        }

        tracing::info!(
            organizations = summary.organizations,
            clauses = summary.clauses,
            questions = summary.questions,
            responses = summary.responses,
            "seeded sample data"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{day, new_org, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn seeds_empty_store() {
        let svc = test_service().await;
        let summary = svc.seed_sample_data(day(1)).await.unwrap();

        assert_eq!(summary.organizations, 10);
        assert_eq!(summary.clauses, 5);
        assert_eq!(summary.questions, 15);
        assert_eq!(summary.responses, 150 - 150 / SKIP_EVERY);
        assert_eq!(svc.list_responses(None).await.unwrap().len(), summary.responses);

        let chart = svc.yes_no_chart().await.unwrap();
        assert_eq!(chart.len(), 10);
        assert!(chart.iter().all(|t| t.total == t.yes + t.no + t.not_applicable));
    }

    #[tokio::test]
    async fn refuses_when_organizations_exist() {
        let svc = test_service().await;
        svc.create_organization(&new_org("Existing")).await.unwrap();

        let err = svc.seed_sample_data(day(1)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)), "got {err:?}");
    }
}
