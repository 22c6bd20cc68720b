//! Extraction Stage — turns a free-text query into an `ExtractedRecord`.
//!
//! Two fallback layers, kept apart on purpose:
//! 1. `parse_json_object`: model output that does not parse yields `None`, and the
//!    stage carries on with an empty object.
//! 2. `fill_defaults`: every field missing from that object gets its per-task default.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::assistant::prompts::fill_template;
use crate::assistant::record::{ExtractedRecord, FieldValue};
use crate::assistant::task::{FieldDefault, FieldKind, FieldSpec, TaskKind, TaskSpec};
use crate::errors::AppError;
use crate::llm_client::{CompletionModel, LlmError, CLASSIFY_TEMPERATURE};

/// Asks the model for the task's fields and resolves them into a complete record.
///
/// A model failure is returned as an error. Unparseable output is not an error.
pub async fn extract(
    llm: &dyn CompletionModel,
    kind: TaskKind,
    query: &str,
) -> Result<ExtractedRecord, AppError> {
    let spec = kind.spec();
    let raw = request_fields(llm, spec, query).await?;
    Ok(fill_defaults(spec, &raw, query))
}

/// One extraction call. Returns the parsed object, or an empty one if parsing failed.
pub async fn request_fields(
    llm: &dyn CompletionModel,
    spec: &TaskSpec,
    query: &str,
) -> Result<Map<String, Value>, LlmError> {
    let prompt = fill_template(spec.extraction_template, |name| {
        (name == "query").then_some(query)
    });
    let response = llm.complete(&prompt, CLASSIFY_TEMPERATURE).await?;

    match parse_json_object(&response) {
        Some(object) => {
            debug!(
                "Extraction for {}: fields={:?}",
                spec.kind,
                object.keys().collect::<Vec<_>>()
            );
            Ok(object)
        }
        None => {
            warn!(
                "Extraction for {} returned no parseable JSON object; using defaults",
                spec.kind
            );
            Ok(Map::new())
        }
    }
}

/// Parses the text between the first `{` and the last `}` (inclusive) as a JSON object.
pub fn parse_json_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => None,
        Err(e) => {
            debug!("Extraction JSON parse failed: {e}");
            None
        }
    }
}

/// Resolves every field of `spec` from `raw`, substituting the per-field default
/// for each one that is absent or `null`. Present fields are kept verbatim.
pub fn fill_defaults(spec: &TaskSpec, raw: &Map<String, Value>, query: &str) -> ExtractedRecord {
    let fields = spec
        .fields
        .iter()
        .map(|field| {
            let value = resolve(field, raw.get(field.name), || extraction_default(field, query));
            (field.name, value)
        })
        .collect::<BTreeMap<_, _>>();

    ExtractedRecord::new(spec.kind, fields)
}

/// Builds a record from a direct API request body. Fields are looked up by their
/// wire name; absent ones become empty text (or 0 for integer fields).
pub fn record_from_request(spec: &TaskSpec, body: &Map<String, Value>) -> ExtractedRecord {
    let fields = spec
        .fields
        .iter()
        .map(|field| {
            let value = resolve(field, body.get(field.wire_name), || empty_default(field));
            (field.name, value)
        })
        .collect::<BTreeMap<_, _>>();

    ExtractedRecord::new(spec.kind, fields)
}

fn resolve<F>(field: &FieldSpec, value: Option<&Value>, default: F) -> FieldValue
where
    F: FnOnce() -> FieldValue,
{
    let value = match value {
        None | Some(Value::Null) => return default(),
        Some(value) => value,
    };

    match field.kind {
        FieldKind::Text => FieldValue::Text(render_text(value)),
        FieldKind::Integer => match coerce_integer(value) {
            Some(n) => FieldValue::Integer(n),
            None => {
                warn!(
                    "Field '{}' is not an integer ({value}); using 0",
                    field.name
                );
                FieldValue::Integer(0)
            }
        },
    }
}

fn extraction_default(field: &FieldSpec, query: &str) -> FieldValue {
    match field.default {
        FieldDefault::Literal(text) => FieldValue::text(text),
        FieldDefault::Query => FieldValue::text(query),
        FieldDefault::Zero => FieldValue::Integer(0),
    }
}

fn empty_default(field: &FieldSpec) -> FieldValue {
    match field.kind {
        FieldKind::Text => FieldValue::text(""),
        FieldKind::Integer => FieldValue::Integer(0),
    }
}

/// Integer coercion for numeric fields.
///
/// Accepts JSON integers, JSON floats (truncated) and numeric strings.
/// Returns `None` for anything else, including the empty string.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Text rendering for non-string values: scalars as JSON text, arrays joined
/// with ", ", objects as compact JSON.
fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(render_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::StubModel;

    const JOB_QUERY: &str = "Tìm việc lập trình viên Python tại Hà Nội, 2 năm kinh nghiệm";

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn text(record: &ExtractedRecord, name: &str) -> String {
        record.get(name).unwrap().to_string()
    }

    // ── parse_json_object ────────────────────────────────────────────────

    #[test]
    fn test_parse_plain_object() {
        let parsed = parse_json_object(r#"{"name": "A"}"#).unwrap();
        assert_eq!(parsed["name"], "A");
    }

    #[test]
    fn test_parse_slices_first_to_last_brace() {
        let parsed = parse_json_object("Đây là kết quả: {\"name\": \"A\"} -- done").unwrap();
        assert_eq!(Value::Object(parsed), json!({"name": "A"}));
    }

    #[test]
    fn test_parse_code_fenced_object() {
        let parsed = parse_json_object("```json\n{\"salary\": \"20 triệu\"}\n```").unwrap();
        assert_eq!(parsed["salary"], "20 triệu");
    }

    #[test]
    fn test_parse_nested_object_keeps_outer() {
        let parsed = parse_json_object(r#"x {"a": {"b": 1}} y"#).unwrap();
        assert_eq!(parsed["a"]["b"], 1);
    }

    #[test]
    fn test_parse_no_braces_is_none() {
        assert!(parse_json_object("no braces here").is_none());
    }

    #[test]
    fn test_parse_only_open_brace_is_none() {
        assert!(parse_json_object("{ \"name\": \"A\"").is_none());
    }

    #[test]
    fn test_parse_reversed_braces_is_none() {
        assert!(parse_json_object("} oops {").is_none());
    }

    #[test]
    fn test_parse_truncated_json_is_none() {
        assert!(parse_json_object(r#"{"name": "A", "email": }"#).is_none());
    }

    #[test]
    fn test_parse_two_objects_is_none() {
        // First `{` to last `}` spans both objects, which is not valid JSON.
        assert!(parse_json_object(r#"{"a": 1} and {"b": 2}"#).is_none());
    }

    #[test]
    fn test_parse_empty_string_is_none() {
        assert!(parse_json_object("").is_none());
    }

    // ── fill_defaults ────────────────────────────────────────────────────

    #[test]
    fn test_empty_object_yields_full_default_set_for_every_task() {
        let empty = Map::new();
        let query = "truy vấn gốc";

        let jobs = fill_defaults(TaskKind::FindJobs.spec(), &empty, query);
        assert_eq!(text(&jobs, "job_description"), query);
        assert_eq!(text(&jobs, "salary"), "");
        assert_eq!(text(&jobs, "location"), "");
        assert_eq!(jobs.get("experience"), Some(&FieldValue::Integer(0)));

        let email = fill_defaults(TaskKind::WriteEmail.spec(), &empty, query);
        assert_eq!(text(&email, "job_title"), "Vị trí ứng tuyển");
        assert_eq!(text(&email, "company"), "Công ty");
        assert_eq!(text(&email, "skills"), query);

        let review = fill_defaults(TaskKind::EvaluateCv.spec(), &empty, query);
        assert_eq!(text(&review, "cv_text"), query);
        assert_eq!(text(&review, "job_description"), "");

        let companies = fill_defaults(TaskKind::FindCompanies.spec(), &empty, query);
        assert_eq!(text(&companies, "skills"), query);
        assert_eq!(text(&companies, "industry"), "Công nghệ thông tin");
        assert_eq!(text(&companies, "location"), "");

        let cv = fill_defaults(TaskKind::CreateCv.spec(), &empty, query);
        assert_eq!(text(&cv, "name"), "Nguyễn Văn A");
        assert_eq!(text(&cv, "email"), "example@email.com");
        assert_eq!(text(&cv, "phone"), "");
        assert_eq!(text(&cv, "education"), "");
        assert_eq!(text(&cv, "experience"), query);
        assert_eq!(text(&cv, "skills"), "");
    }

    #[test]
    fn test_missing_salary_defaults_and_experience_is_coerced() {
        let raw = object(json!({
            "job_description": "lập trình viên Python",
            "location": "Hà Nội",
            "experience": "2"
        }));
        let record = fill_defaults(TaskKind::FindJobs.spec(), &raw, JOB_QUERY);

        assert_eq!(text(&record, "job_description"), "lập trình viên Python");
        assert_eq!(text(&record, "location"), "Hà Nội");
        assert_eq!(text(&record, "salary"), "");
        assert_eq!(record.get("experience"), Some(&FieldValue::Integer(2)));
    }

    #[test]
    fn test_only_omitted_field_is_replaced() {
        let raw = object(json!({
            "name": "Trần Thị B",
            "email": "b@example.vn",
            "phone": "0901234567",
            "education": "ĐH Bách Khoa",
            "skills": "Rust, SQL"
        }));
        let record = fill_defaults(TaskKind::CreateCv.spec(), &raw, "kinh nghiệm 3 năm");

        assert_eq!(text(&record, "name"), "Trần Thị B");
        assert_eq!(text(&record, "email"), "b@example.vn");
        assert_eq!(text(&record, "phone"), "0901234567");
        assert_eq!(text(&record, "education"), "ĐH Bách Khoa");
        assert_eq!(text(&record, "skills"), "Rust, SQL");
        assert_eq!(text(&record, "experience"), "kinh nghiệm 3 năm");
    }

    #[test]
    fn test_present_empty_string_is_kept_verbatim() {
        let raw = object(json!({"job_title": "", "company": "FPT", "skills": "Go"}));
        let record = fill_defaults(TaskKind::WriteEmail.spec(), &raw, "q");
        assert_eq!(text(&record, "job_title"), "");
    }

    #[test]
    fn test_null_field_counts_as_absent() {
        let raw = object(json!({"skills": "Java", "industry": null, "location": "Đà Nẵng"}));
        let record = fill_defaults(TaskKind::FindCompanies.spec(), &raw, "q");
        assert_eq!(text(&record, "industry"), "Công nghệ thông tin");
        assert_eq!(text(&record, "location"), "Đà Nẵng");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let raw = object(json!({"cv_text": "CV", "mood": "happy"}));
        let record = fill_defaults(TaskKind::EvaluateCv.spec(), &raw, "q");
        assert_eq!(record.fields().count(), 2);
        assert!(record.get("mood").is_none());
    }

    #[test]
    fn test_non_numeric_experience_becomes_zero() {
        let raw = object(json!({"experience": "vài năm"}));
        let record = fill_defaults(TaskKind::FindJobs.spec(), &raw, "q");
        assert_eq!(record.get("experience"), Some(&FieldValue::Integer(0)));
    }

    #[test]
    fn test_non_string_text_fields_render_as_text() {
        let raw = object(json!({
            "skills": ["Python", "Django", null],
            "industry": 42,
            "location": {"city": "Huế"}
        }));
        let record = fill_defaults(TaskKind::FindCompanies.spec(), &raw, "q");
        assert_eq!(text(&record, "skills"), "Python, Django");
        assert_eq!(text(&record, "industry"), "42");
        assert_eq!(text(&record, "location"), r#"{"city":"Huế"}"#);
    }

    // ── coerce_integer ───────────────────────────────────────────────────

    #[test]
    fn test_coerce_integer_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_integer(&json!(3)), Some(3));
        assert_eq!(coerce_integer(&json!(2.9)), Some(2));
        assert_eq!(coerce_integer(&json!(" 5 ")), Some(5));
        assert_eq!(coerce_integer(&json!("1.5")), Some(1));
        assert_eq!(coerce_integer(&json!("-1")), Some(-1));
    }

    #[test]
    fn test_coerce_integer_rejects_everything_else() {
        assert_eq!(coerce_integer(&json!("")), None);
        assert_eq!(coerce_integer(&json!("2 năm")), None);
        assert_eq!(coerce_integer(&json!(true)), None);
        assert_eq!(coerce_integer(&json!([2])), None);
        assert_eq!(coerce_integer(&json!("NaN")), None);
    }

    // ── record_from_request ──────────────────────────────────────────────

    #[test]
    fn test_request_record_uses_wire_names_and_empty_defaults() {
        let body = object(json!({"jobDescription": "Kỹ sư dữ liệu", "experience": "4"}));
        let record = record_from_request(TaskKind::FindJobs.spec(), &body);
        assert_eq!(text(&record, "job_description"), "Kỹ sư dữ liệu");
        assert_eq!(text(&record, "salary"), "");
        assert_eq!(text(&record, "location"), "");
        assert_eq!(record.get("experience"), Some(&FieldValue::Integer(4)));
    }

    #[test]
    fn test_request_record_does_not_use_extraction_defaults() {
        let body = object(json!({"skills": "Rust"}));
        let record = record_from_request(TaskKind::WriteEmail.spec(), &body);
        assert_eq!(text(&record, "job_title"), "");
        assert_eq!(text(&record, "company"), "");
        assert_eq!(text(&record, "skills"), "Rust");
    }

    // ── extract (with a stubbed model) ───────────────────────────────────

    #[tokio::test]
    async fn test_extract_job_scenario() {
        let llm = StubModel::sequence([
            r#"{"job_description":"lập trình viên Python","location":"Hà Nội","experience":"2"}"#,
        ]);
        let record = extract(&llm, TaskKind::FindJobs, JOB_QUERY).await.unwrap();

        assert_eq!(text(&record, "salary"), "");
        assert_eq!(record.get("experience"), Some(&FieldValue::Integer(2)));

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, CLASSIFY_TEMPERATURE);
        assert!(calls[0].prompt.contains(&format!("Yêu cầu: {JOB_QUERY}")));
        assert!(calls[0].prompt.contains("\"experience\""));
    }

    #[tokio::test]
    async fn test_extract_surrounded_json_scenario() {
        let llm = StubModel::sequence(["Đây là kết quả: {\"name\": \"A\"} -- done"]);
        let record = extract(&llm, TaskKind::CreateCv, "tạo CV cho tôi").await.unwrap();

        assert_eq!(text(&record, "name"), "A");
        assert_eq!(text(&record, "email"), "example@email.com");
        assert_eq!(text(&record, "experience"), "tạo CV cho tôi");
    }

    #[tokio::test]
    async fn test_extract_without_braces_gives_all_defaults() {
        let llm = StubModel::sequence(["no braces here"]);
        let query = "viết email ứng tuyển";
        let record = extract(&llm, TaskKind::WriteEmail, query).await.unwrap();

        assert_eq!(
            record,
            fill_defaults(TaskKind::WriteEmail.spec(), &Map::new(), query)
        );
    }

    #[tokio::test]
    async fn test_request_fields_returns_empty_object_on_garbage() {
        let llm = StubModel::sequence(["{ definitely not json }"]);
        let raw = request_fields(&llm, TaskKind::EvaluateCv.spec(), "q").await.unwrap();
        assert!(raw.is_empty());
    }

    #[tokio::test]
    async fn test_extract_propagates_model_failure() {
        let llm = StubModel::results([Err(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })]);
        let err = extract(&llm, TaskKind::FindCompanies, "q").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(LlmError::Api { status: 503, .. })));
    }
}
