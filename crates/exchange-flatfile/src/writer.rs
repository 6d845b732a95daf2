//! Fixed-width line and file generation.

use serde_json::{Map, Value};

use crate::schema::{FieldDef, FieldType};

/// Generate one fixed-width line from a record.
///
/// Fields are emitted in schema order with no separators. Number fields are
/// left-padded with `'0'` to their declared length; everything else is
/// right-padded with spaces. Missing record values render as empty. This is
/// the inverse of [`parse_line`](crate::reader::parse_line) for records
/// whose values fit their declared widths.
pub fn generate_line(record: &Map<String, Value>, fields: &[FieldDef]) -> String {
    let mut line = String::new();
    for field in fields {
        let text = record.get(&field.name).map(value_text).unwrap_or_default();
        let width = field.length;
        match field.field_type {
            FieldType::Number => line.push_str(&format!("{text:0>width$}")),
            FieldType::String | FieldType::Date => line.push_str(&format!("{text:<width$}")),
        }
    }
    line
}

/// Generate a fixed-width file, one line per record.
pub fn generate_content(records: &[Map<String, Value>], fields: &[FieldDef]) -> String {
    records
        .iter()
        .map(|record| generate_line(record, fields))
        .collect::<Vec<_>>()
        .join("\n")
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            // Whole floats print without a trailing ".0"
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    return format!("{f:.0}");
                }
            }
            n.to_string()
        }
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
