//! Value transforms.
//!
//! One function per transform, operating on loosely typed JSON values.
//! String transforms stringify non-string input; numeric coercion never
//! produces NaN.

use chrono::NaiveDate;
use exchange_model::FieldTransform;
use serde_json::Value;

/// Apply a transform to a value.
///
/// Returns the transformed value, or `None` when the transform does not
/// apply to the input (currently only unparseable `date` input); the caller
/// decides how to degrade.
pub fn apply_transform(value: &Value, transform: FieldTransform) -> Option<Value> {
    match transform {
        FieldTransform::Uppercase => Some(Value::String(value_text(value).to_uppercase())),
        FieldTransform::Lowercase => Some(Value::String(value_text(value).to_lowercase())),
        FieldTransform::Trim => Some(Value::String(value_text(value).trim().to_string())),
        FieldTransform::Number => Some(Value::from(value_to_f64(value))),
        FieldTransform::Date => transform_date(value),
        FieldTransform::Cnpj => Some(Value::String(transform_cnpj(&value_text(value)))),
        FieldTransform::None => Some(value.clone()),
    }
}

/// Native stringification of a JSON value.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Numeric coercion. Non-numeric input and NaN both normalize to 0.
pub(crate) fn value_to_f64(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if parsed.is_nan() { 0.0 } else { parsed }
}

/// Parse a date in one of the accepted input formats and reformat it to
/// `YYYY-MM-DD`. Returns `None` for unparseable input.
fn transform_date(value: &Value) -> Option<Value> {
    let text = value_text(value);
    let trimmed = text.trim();
    const FORMATS: [&str; 3] = ["%Y%m%d", "%Y-%m-%d", "%d/%m/%Y"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
}

/// Strip non-digit characters and left-pad with zeros to 14 digits.
fn transform_cnpj(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    format!("{digits:0>14}")
}
