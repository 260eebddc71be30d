//! Serde roundtrip and JsonSchema validation tests for entity and wire types.

use chrono::NaiveDate;
use schemars::schema_for;
use survey_core::entities::*;
use survey_core::enums::ResponseType;
use survey_core::narrative::NarrativeComparison;
use survey_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
}

roundtrip_and_validate!(
    organization_roundtrip,
    Organization,
    Organization {
        id: 1,
        name: "Ministry of Planning".into(),
        year_of_association: 2020,
        details: Some("Federal ministry".into()),
    }
);

roundtrip_and_validate!(
    clause_roundtrip,
    Clause,
    Clause {
        id: 4,
        name: "access_control".into(),
        title: "Access Control & Authentication".into(),
    }
);

roundtrip_and_validate!(
    question_roundtrip,
    Question,
    Question {
        id: 12,
        text: "Is multi-factor authentication enforced for administrators?".into(),
        title: "MFA for administrators".into(),
        clause_id: 4,
    }
);

roundtrip_and_validate!(
    response_roundtrip,
    Response,
    Response {
        id: 99,
        organization_id: 1,
        clause_id: 4,
        question_id: 12,
        response_type: ResponseType::NotApplicable,
        comment: None,
        date: date(),
    }
);

roundtrip_and_validate!(
    new_response_roundtrip,
    NewResponse,
    NewResponse {
        organization_id: 1,
        clause_id: 4,
        question_id: 12,
        response_type: ResponseType::Yes,
        comment: Some("Enforced via SSO".into()),
        date: date(),
    }
);

roundtrip_and_validate!(
    response_record_roundtrip,
    ResponseRecord,
    ResponseRecord::from(Response {
        id: 3,
        organization_id: 2,
        clause_id: 1,
        question_id: 5,
        response_type: ResponseType::No,
        comment: Some("Planned for Q3".into()),
        date: date(),
    })
);

roundtrip_and_validate!(
    compare_record_roundtrip,
    CompareRecord,
    CompareRecord {
        organization_id: 2,
        clause_id: 1,
        question_id: 5,
        response_text: ResponseType::Yes,
        date: date(),
    }
);

roundtrip_and_validate!(
    narrative_roundtrip,
    NarrativeComparison,
    NarrativeComparison {
        similarities: vec!["Both enforce MFA".into()],
        differences: vec!["Only one runs incident drills".into()],
        summary: "Broadly aligned on access control.".into(),
    }
);

// --- Wire shape ---

#[test]
fn response_record_carries_both_field_names() {
    let record = ResponseRecord::from(Response {
        id: 1,
        organization_id: 1,
        clause_id: 1,
        question_id: 1,
        response_type: ResponseType::NotApplicable,
        comment: None,
        date: date(),
    });
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["response_type"], "Not applicable");
    assert_eq!(value["response_text"], "Not applicable");
    assert_eq!(value["date"], "2024-11-05");
}

// --- Schema rejection tests ---

#[test]
fn schema_rejects_response_without_question() {
    let schema = serde_json::to_value(schema_for!(Response)).unwrap();
    let invalid = serde_json::json!({
        "id": 1,
        "organization_id": 1,
        "clause_id": 1,
        "response_type": "Yes",
        "comment": null,
        "date": "2024-01-01"
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(
        !errors.is_empty(),
        "Should reject response without 'question_id'"
    );
}

#[test]
fn schema_rejects_invalid_classification() {
    let schema = serde_json::to_value(schema_for!(Response)).unwrap();
    let invalid = serde_json::json!({
        "id": 1,
        "organization_id": 1,
        "clause_id": 1,
        "question_id": 1,
        "response_type": "Maybe",
        "comment": null,
        "date": "2024-01-01"
    });
    let errors = validate_against_schema(&schema, &invalid);
    assert!(!errors.is_empty(), "Should reject unknown classification");
}
