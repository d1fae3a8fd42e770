//! Input validation for analysis requests.
//!
//! Checks the structure of raw JSON before it reaches the scoring engine,
//! which itself never rejects input. Detects:
//! - Records that are not JSON objects
//! - Missing or blank titles
//! - Fields of the wrong type (ids, dates, numbers, dependency lists)
//! - Non-positive effort estimates
//! - Unknown strategy names and non-numeric weights
//!
//! Numbers given as numeric strings (`"2.5"`, `"7"`) are accepted, as are
//! explicit `null`s for optional fields. Text fields take numbers too
//! (`"title": 5` becomes `"5"`). `NaN` and infinities are never accepted.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::TaskInput;
use crate::scoring::{AnalysisOptions, Strategy};

/// Validation result.
pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending field (empty for whole-record errors).
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// The record is not a JSON object.
    NotAnObject,
    /// A required field is absent or blank.
    MissingField,
    /// A field has the wrong JSON type.
    InvalidType,
    /// A field has the right type but an unacceptable value.
    InvalidValue,
    /// A value is not among the allowed choices.
    UnknownChoice,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, field: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// The first record of a batch that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidTask {
    /// Position in the submitted list.
    pub index: usize,
    /// The record as submitted.
    pub task: Value,
    /// Every problem found in the record.
    pub errors: Vec<ValidationError>,
}

/// Validates a list of raw task records, stopping at the first bad one.
pub fn validate_tasks(values: &[Value]) -> Result<Vec<TaskInput>, InvalidTask> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            validate_task(value).map_err(|errors| InvalidTask {
                index,
                task: value.clone(),
                errors,
            })
        })
        .collect()
}

/// Validates one raw task record.
///
/// Checks:
/// 1. The record is an object
/// 2. `title` is a non-blank string (numbers are coerced)
/// 3. `id`, if present, is a string or number
/// 4. `due_date`, if present, is a string or number
/// 5. `estimated_hours`, if present, is a positive finite number
/// 6. `importance`, if present, is an integer
/// 7. `dependencies`, if present, is a list of strings or numbers
///
/// # Returns
/// The typed record, or all problems found.
pub fn validate_task(value: &Value) -> ValidationResult<TaskInput> {
    let Some(obj) = value.as_object() else {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::NotAnObject,
            "",
            "Task must be a JSON object",
        )]);
    };

    let mut errors = Vec::new();
    let mut input = TaskInput::default();

    match present(obj, "title").map(loose_string) {
        Some(Some(s)) if !s.trim().is_empty() => input.title = Some(s),
        Some(Some(_)) | None => errors.push(ValidationError::new(
            ValidationErrorKind::MissingField,
            "title",
            "This field is required",
        )),
        Some(None) => errors.push(type_error("title", "a string")),
    }

    match present(obj, "id") {
        None => {}
        Some(v) => match loose_string(v) {
            Some(id) => input.id = Some(id),
            None => errors.push(type_error("id", "a string or number")),
        },
    }

    match present(obj, "due_date") {
        None => {}
        Some(v) => match loose_string(v) {
            Some(s) => input.due_date = Some(s),
            None => errors.push(type_error("due_date", "a date string")),
        },
    }

    match present(obj, "estimated_hours") {
        None => {}
        Some(v) => match number(v) {
            Some(h) if h.is_finite() && h > 0.0 => input.estimated_hours = Some(h),
            Some(h) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidValue,
                "estimated_hours",
                format!("Must be a positive number, got {h}"),
            )),
            None => errors.push(type_error("estimated_hours", "a number")),
        },
    }

    match present(obj, "importance") {
        None => {}
        Some(v) => match integer(v) {
            Some(i) => input.importance = Some(i),
            None => errors.push(type_error("importance", "an integer")),
        },
    }

    match present(obj, "dependencies") {
        None => {}
        Some(Value::Array(items)) => {
            let deps: Option<Vec<String>> = items.iter().map(loose_string).collect();
            match deps {
                Some(deps) => input.dependencies = Some(deps),
                None => errors.push(type_error("dependencies", "a list of ids")),
            }
        }
        Some(_) => errors.push(type_error("dependencies", "a list of ids")),
    }

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(errors)
    }
}

/// Validates the `options` object of an analysis request.
///
/// A missing or `null` value yields the default options. The strategy must
/// be one of the preset names; weight values must be finite numbers.
/// Unknown weight keys are kept (the engine ignores them).
pub fn validate_options(value: Option<&Value>) -> ValidationResult<AnalysisOptions> {
    let obj = match value {
        None | Some(Value::Null) => return Ok(AnalysisOptions::default()),
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            return Err(vec![ValidationError::new(
                ValidationErrorKind::NotAnObject,
                "",
                "Options must be a JSON object",
            )])
        }
    };

    let mut errors = Vec::new();
    let mut options = AnalysisOptions::default();

    match present(obj, "strategy") {
        None => {}
        Some(Value::String(name)) => match name.parse::<Strategy>() {
            Ok(strategy) => options.strategy = strategy,
            Err(_) => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownChoice,
                "strategy",
                format!(
                    "\"{name}\" is not a valid choice; expected one of {}",
                    Strategy::ALL.map(Strategy::name).join(", ")
                ),
            )),
        },
        Some(_) => errors.push(type_error("strategy", "a string")),
    }

    match present(obj, "weights") {
        None => {}
        Some(Value::Object(map)) => {
            let mut weights = HashMap::with_capacity(map.len());
            for (key, v) in map {
                match number(v) {
                    Some(w) if w.is_finite() => {
                        weights.insert(key.clone(), w);
                    }
                    Some(w) => errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidValue,
                        &format!("weights.{key}"),
                        format!("Must be a finite number, got {w}"),
                    )),
                    None => errors.push(type_error(&format!("weights.{key}"), "a number")),
                }
            }
            options.weights = weights;
        }
        Some(_) => errors.push(type_error("weights", "an object of numbers")),
    }

    if errors.is_empty() {
        Ok(options)
    } else {
        Err(errors)
    }
}

/// Field value, treating explicit `null` as absent.
fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn type_error(field: &str, expected: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::InvalidType,
        field,
        format!("Expected {expected}"),
    )
}

fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kinds(errors: &[ValidationError]) -> Vec<(ValidationErrorKind, &str)> {
        errors.iter().map(|e| (e.kind, e.field.as_str())).collect()
    }

    #[test]
    fn test_valid_task() {
        let input = validate_task(&json!({
            "id": "t1",
            "title": "Fix login bug",
            "due_date": "2025-03-01",
            "estimated_hours": 2,
            "importance": 8,
            "dependencies": ["t0", 4]
        }))
        .unwrap();

        assert_eq!(input.id.as_deref(), Some("t1"));
        assert_eq!(input.title.as_deref(), Some("Fix login bug"));
        assert_eq!(input.due_date.as_deref(), Some("2025-03-01"));
        assert_eq!(input.estimated_hours, Some(2.0));
        assert_eq!(input.importance, Some(8));
        assert_eq!(
            input.dependencies,
            Some(vec!["t0".to_string(), "4".to_string()])
        );
    }

    #[test]
    fn test_minimal_task() {
        let input = validate_task(&json!({"title": "Only a title"})).unwrap();
        assert_eq!(input, TaskInput::new("Only a title"));
    }

    #[test]
    fn test_nulls_treated_as_absent() {
        let input = validate_task(&json!({
            "title": "x",
            "id": null,
            "due_date": null,
            "estimated_hours": null,
            "dependencies": null
        }))
        .unwrap();
        assert_eq!(input, TaskInput::new("x"));
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let input = validate_task(&json!({
            "title": "x",
            "estimated_hours": "1.5",
            "importance": "7"
        }))
        .unwrap();
        assert_eq!(input.estimated_hours, Some(1.5));
        assert_eq!(input.importance, Some(7));
    }

    #[test]
    fn test_missing_title() {
        let errors = validate_task(&json!({"importance": 3})).unwrap_err();
        assert_eq!(kinds(&errors), vec![(ValidationErrorKind::MissingField, "title")]);

        let errors = validate_task(&json!({"title": "   "})).unwrap_err();
        assert_eq!(kinds(&errors), vec![(ValidationErrorKind::MissingField, "title")]);
    }

    #[test]
    fn test_not_an_object() {
        let errors = validate_task(&json!(["title"])).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NotAnObject);
    }

    #[test]
    fn test_non_positive_hours() {
        for hours in [json!(0), json!(-2.5)] {
            let errors = validate_task(&json!({"title": "x", "estimated_hours": hours})).unwrap_err();
            assert_eq!(
                kinds(&errors),
                vec![(ValidationErrorKind::InvalidValue, "estimated_hours")]
            );
        }
    }

    #[test]
    fn test_fractional_importance_rejected() {
        let errors = validate_task(&json!({"title": "x", "importance": 5.5})).unwrap_err();
        assert_eq!(kinds(&errors), vec![(ValidationErrorKind::InvalidType, "importance")]);

        let input = validate_task(&json!({"title": "x", "importance": 6.0})).unwrap();
        assert_eq!(input.importance, Some(6));
    }

    #[test]
    fn test_multiple_errors() {
        let errors = validate_task(&json!({
            "id": {"nested": true},
            "due_date": ["2025-03-01"],
            "estimated_hours": "lots",
            "dependencies": "t1"
        }))
        .unwrap_err();

        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.field == "title"));
        assert!(errors
            .iter()
            .filter(|e| e.field != "title")
            .all(|e| e.kind == ValidationErrorKind::InvalidType));
    }

    #[test]
    fn test_dependency_items_checked() {
        let errors = validate_task(&json!({"title": "x", "dependencies": ["a", null]})).unwrap_err();
        assert_eq!(kinds(&errors), vec![(ValidationErrorKind::InvalidType, "dependencies")]);
    }

    #[test]
    fn test_validate_tasks_reports_first_failure() {
        let values = vec![json!({"title": "ok"}), json!({"id": "bad"}), json!(42)];
        let err = validate_tasks(&values).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.task, json!({"id": "bad"}));
        assert_eq!(err.errors[0].field, "title");
    }

    #[test]
    fn test_validate_tasks_ok() {
        let values = vec![json!({"title": "a"}), json!({"title": "b", "id": 2})];
        let inputs = validate_tasks(&values).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_default_options() {
        let options = validate_options(None).unwrap();
        assert_eq!(options.strategy, Strategy::SmartBalance);
        assert!(options.weights.is_empty());
        assert!(validate_options(Some(&Value::Null)).is_ok());
    }

    #[test]
    fn test_options_parsed() {
        let options = validate_options(Some(&json!({
            "strategy": "deadline_driven",
            "weights": {"urgency": 0.9, "effort": "0.05", "mystery": 1}
        })))
        .unwrap();
        assert_eq!(options.strategy, Strategy::DeadlineDriven);
        assert_eq!(options.weights.get("urgency"), Some(&0.9));
        assert_eq!(options.weights.get("effort"), Some(&0.05));
        assert_eq!(options.weights.get("mystery"), Some(&1.0));
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let errors = validate_options(Some(&json!({"strategy": "yolo"}))).unwrap_err();
        assert_eq!(kinds(&errors), vec![(ValidationErrorKind::UnknownChoice, "strategy")]);
        assert!(errors[0].message.contains("smart_balance"));
    }

    #[test]
    fn test_bad_weights_rejected() {
        let errors = validate_options(Some(&json!({"weights": {"urgency": "high"}}))).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![(ValidationErrorKind::InvalidType, "weights.urgency")]
        );

        let errors = validate_options(Some(&json!({"weights": [0.5]}))).unwrap_err();
        assert_eq!(kinds(&errors), vec![(ValidationErrorKind::InvalidType, "weights")]);
    }

    #[test]
    fn test_non_finite_weights_rejected() {
        for raw in [json!("NaN"), json!("inf"), json!("-inf")] {
            let errors = validate_options(Some(&json!({"weights": {"urgency": raw}}))).unwrap_err();
            assert_eq!(
                kinds(&errors),
                vec![(ValidationErrorKind::InvalidValue, "weights.urgency")]
            );
        }
    }

    #[test]
    fn test_non_finite_hours_rejected() {
        let errors = validate_task(&json!({"title": "x", "estimated_hours": "NaN"})).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![(ValidationErrorKind::InvalidValue, "estimated_hours")]
        );
    }

    #[test]
    fn test_numeric_text_fields_coerced() {
        let input = validate_task(&json!({"title": 5, "due_date": 20250301})).unwrap();
        assert_eq!(input.title.as_deref(), Some("5"));
        assert_eq!(input.due_date.as_deref(), Some("20250301"));

        let errors = validate_task(&json!({"title": true})).unwrap_err();
        assert_eq!(kinds(&errors), vec![(ValidationErrorKind::InvalidType, "title")]);
    }

    #[test]
    fn test_options_not_object() {
        let errors = validate_options(Some(&json!("fast"))).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NotAnObject);
    }
}
