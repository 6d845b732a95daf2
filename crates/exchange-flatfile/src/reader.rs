//! Fixed-width line and file parsing.

use serde_json::{Map, Value};

use crate::schema::{FieldDef, FieldType};

/// Parse one fixed-width line into a record.
///
/// Each field's window `[start, start+length)` is extracted and trimmed.
/// Number fields coerce to `f64`, with non-numeric or empty input reading
/// as 0. Lines shorter than a field window yield empty extraction rather
/// than an error.
pub fn parse_line(line: &str, fields: &[FieldDef]) -> Map<String, Value> {
    let mut record = Map::new();
    for field in fields {
        let raw: String = line
            .chars()
            .skip(field.start)
            .take(field.length)
            .collect();
        let trimmed = raw.trim();
        let value = match field.field_type {
            FieldType::Number => Value::from(trimmed.parse::<f64>().unwrap_or(0.0)),
            FieldType::String | FieldType::Date => Value::String(trimmed.to_string()),
        };
        record.insert(field.name.clone(), value);
    }
    record
}

/// Parse a whole fixed-width file.
///
/// Lines that are empty after trimming are dropped; input order is
/// preserved.
pub fn parse_content(content: &str, fields: &[FieldDef]) -> Vec<Map<String, Value>> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, fields))
        .collect()
}
