//! Narrative comparison: prompt construction and model-output extraction.
//!
//! The model is asked for strict JSON, but output is taken as it comes.
//! Extraction order on the trimmed text, first success wins:
//!
//! 1. the whole text as JSON;
//! 2. the first fenced block (```` ``` ```` or ```` ```json ````) as JSON;
//! 3. the text itself when it is bounded by `{` ... `}`.
//!
//! Anything else, or a parsed value that is not an object, degrades to
//! `{similarities: [], differences: [], summary: <text>}`. Extraction never
//! fails.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::{Organization, Response};

/// Structured result of `GET /ai/compare`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NarrativeComparison {
    pub similarities: Vec<String>,
    pub differences: Vec<String>,
    pub summary: String,
}

impl NarrativeComparison {
    /// Information-poor result carrying the raw model text as the summary.
    #[must_use]
    pub fn degraded(text: impl Into<String>) -> Self {
        Self {
            similarities: Vec::new(),
            differences: Vec::new(),
            summary: text.into(),
        }
    }

    /// Coerce a parsed JSON object into the three output fields.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            similarities: coerce_list(object.get("similarities")),
            differences: coerce_list(object.get("differences")),
            summary: coerce_summary(object.get("summary")),
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// Compact per-response record embedded in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedResponse {
    pub clause_id: i64,
    pub question_id: i64,
    pub response_type: Option<&'static str>,
    pub comment: Option<String>,
    pub date: String,
}

impl From<&Response> for PackedResponse {
    fn from(response: &Response) -> Self {
        Self {
            clause_id: response.clause_id,
            question_id: response.question_id,
            response_type: Some(response.response_type.as_str()),
            comment: response.comment.clone(),
            date: response.date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[must_use]
pub fn pack_responses(responses: &[Response]) -> Vec<PackedResponse> {
    responses.iter().map(PackedResponse::from).collect()
}

/// One side of the comparison as handed to the prompt builder.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeSubject<'a> {
    pub organization: &'a Organization,
    pub responses: &'a [Response],
}

/// Build the single instruction prompt for two organizations.
#[must_use]
pub fn build_prompt(first: NarrativeSubject<'_>, second: NarrativeSubject<'_>) -> String {
    format!(
        "You are an analyst. Compare two organizations based on their survey responses.\n\
         \n\
         {}\n\
         \n\
         {}\n\
         \n\
         Return STRICT JSON with keys: similarities (array of strings), \
         differences (array of strings), summary (string). \
         Do not include any markdown fences.\n",
        describe(1, first),
        describe(2, second),
    )
}

fn describe(position: u8, subject: NarrativeSubject<'_>) -> String {
    let org = subject.organization;
    let packed = serde_json::to_string(&pack_responses(subject.responses))
        .unwrap_or_else(|_| "[]".to_string());
    format!(
        "Organization {position}: {} (year_of_association={}) details={}\nResponses: {packed}",
        org.name,
        org.year_of_association,
        org.details.as_deref().unwrap_or("None"),
    )
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Outcome of parsing model output.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A JSON object was recovered.
    Structured(Map<String, Value>),
    /// Nothing usable; carries the trimmed text.
    Degraded(String),
}

impl Extraction {
    #[must_use]
    pub fn into_comparison(self) -> NarrativeComparison {
        match self {
            Self::Structured(object) => NarrativeComparison::from_object(&object),
            Self::Degraded(text) => NarrativeComparison::degraded(text),
        }
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// Recover a JSON object from free text, fenced JSON or raw JSON.
#[must_use]
pub fn extract(text: &str) -> Extraction {
    let trimmed = text.trim();

    let mut tried: Vec<&str> = Vec::with_capacity(3);
    let candidates = [
        Some(trimmed),
        fenced_block(trimmed),
        braced_object(trimmed),
    ];

    for candidate in candidates.into_iter().flatten() {
        if tried.contains(&candidate) {
            continue;
        }
        tried.push(candidate);
        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            return match value {
                Value::Object(object) => Extraction::Structured(object),
                _ => Extraction::Degraded(trimmed.to_string()),
            };
        }
    }

    Extraction::Degraded(trimmed.to_string())
}

/// Parse model output straight into the three-field result.
#[must_use]
pub fn parse_comparison(text: &str) -> NarrativeComparison {
    extract(text).into_comparison()
}

/// Contents of the first ```` ``` ```` fence, with an optional `json` tag
/// stripped and surrounding whitespace trimmed.
fn fenced_block(text: &str) -> Option<&str> {
    const FENCE: &str = "```";

    let open = text.find(FENCE)?;
    let mut body = &text[open + FENCE.len()..];
    if body.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
        body = &body[4..];
    }
    let close = body.find(FENCE)?;
    Some(body[..close].trim())
}

fn braced_object(text: &str) -> Option<&str> {
    (text.starts_with('{') && text.ends_with('}')).then_some(text)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(stringify).collect(),
        Some(other) if is_truthy(other) => vec![stringify(other)],
        _ => Vec::new(),
    }
}

fn coerce_summary(value: Option<&Value>) -> String {
    match value {
        Some(other) if is_truthy(other) => stringify(other),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ResponseType;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn raw_json_is_returned_unmodified() {
        let text = r#"{"similarities":["a"],"differences":[],"summary":"s"}"#;
        assert_eq!(
            parse_comparison(text),
            NarrativeComparison {
                similarities: strings(&["a"]),
                differences: Vec::new(),
                summary: "s".into(),
            }
        );
    }

    #[test]
    fn fenced_json_with_scalar_similarities() {
        let text = "```json\n{\"summary\":\"ok\",\"similarities\":\"x\"}\n```";
        assert_eq!(
            parse_comparison(text),
            NarrativeComparison {
                similarities: strings(&["x"]),
                differences: Vec::new(),
                summary: "ok".into(),
            }
        );
    }

    #[test]
    fn plain_sentence_degrades() {
        assert_eq!(
            parse_comparison("just a plain sentence"),
            NarrativeComparison::degraded("just a plain sentence")
        );
    }

    #[test]
    fn degraded_summary_is_trimmed() {
        let result = parse_comparison("\n   nothing structured here  \n");
        assert_eq!(result.summary, "nothing structured here");
    }

    #[test]
    fn fence_inside_prose_is_found() {
        let text = "Here you go:\n```\n{\"differences\": [\"d1\", \"d2\"], \"summary\": \"sum\"}\n```\nThanks!";
        let result = parse_comparison(text);
        assert_eq!(result.differences, strings(&["d1", "d2"]));
        assert_eq!(result.summary, "sum");
        assert!(result.similarities.is_empty());
    }

    #[test]
    fn uppercase_json_tag_is_accepted() {
        let text = "```JSON\n{\"summary\": \"upper\"}\n```";
        assert_eq!(parse_comparison(text).summary, "upper");
    }

    #[test]
    fn broken_fence_degrades_to_full_text() {
        let text = "```json\n{\"summary\": \n```";
        assert_eq!(parse_comparison(text), NarrativeComparison::degraded(text));
    }

    #[rstest]
    #[case("[1, 2, 3]")]
    #[case("\"a string\"")]
    #[case("42")]
    #[case("```json\n[\"not\", \"an\", \"object\"]\n```")]
    fn non_object_json_degrades(#[case] text: &str) {
        let extraction = extract(text);
        assert!(extraction.is_degraded());
        assert_eq!(extraction.into_comparison().summary, text);
    }

    #[rstest]
    #[case(serde_json::json!(null), Vec::<&str>::new())]
    #[case(serde_json::json!(""), Vec::<&str>::new())]
    #[case(serde_json::json!(0), Vec::<&str>::new())]
    #[case(serde_json::json!(false), Vec::<&str>::new())]
    #[case(serde_json::json!({}), Vec::<&str>::new())]
    #[case(serde_json::json!("one"), vec!["one"])]
    #[case(serde_json::json!(7), vec!["7"])]
    #[case(serde_json::json!(true), vec!["true"])]
    #[case(serde_json::json!(["a", 2, null]), vec!["a", "2", "null"])]
    fn list_coercion(#[case] value: Value, #[case] expected: Vec<&str>) {
        assert_eq!(coerce_list(Some(&value)), strings(&expected));
    }

    #[test]
    fn missing_fields_become_empty() {
        let result = parse_comparison("{}");
        assert_eq!(result, NarrativeComparison::default());
    }

    #[rstest]
    #[case(serde_json::json!(12), "12")]
    #[case(serde_json::json!(["x", "y"]), "[\"x\",\"y\"]")]
    #[case(serde_json::json!(null), "")]
    #[case(serde_json::json!("plain"), "plain")]
    fn summary_coercion(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(coerce_summary(Some(&value)), expected);
    }

    #[test]
    fn fenced_block_helper() {
        assert_eq!(fenced_block("```json\n{}\n```"), Some("{}"));
        assert_eq!(fenced_block("```\n{}\n```"), Some("{}"));
        assert_eq!(fenced_block("no fences"), None);
        assert_eq!(fenced_block("``` unterminated"), None);
    }

    #[test]
    fn prompt_embeds_both_organizations_and_instructions() {
        let secp = Organization {
            id: 1,
            name: "SECP".into(),
            year_of_association: 2019,
            details: Some("Securities and Exchange Commission".into()),
        };
        let nadra = Organization {
            id: 2,
            name: "NADRA".into(),
            year_of_association: 2021,
            details: None,
        };
        let responses = vec![Response {
            id: 1,
            organization_id: 1,
            clause_id: 3,
            question_id: 11,
            response_type: ResponseType::NotApplicable,
            comment: Some("legacy system".into()),
            date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        }];

        let prompt = build_prompt(
            NarrativeSubject {
                organization: &secp,
                responses: &responses,
            },
            NarrativeSubject {
                organization: &nadra,
                responses: &[],
            },
        );

        assert!(prompt.contains("Organization 1: SECP (year_of_association=2019)"));
        assert!(prompt.contains("details=Securities and Exchange Commission"));
        assert!(prompt.contains("Organization 2: NADRA (year_of_association=2021) details=None"));
        assert!(prompt.contains(r#""response_type":"Not applicable""#));
        assert!(prompt.contains(r#""date":"2024-06-30""#));
        assert!(prompt.contains("Responses: []"));
        assert!(prompt.contains("STRICT JSON"));
        assert!(prompt.contains("Do not include any markdown fences"));
    }
}
