//! Mapping application.
//!
//! Applying a rule list is a projection, not a merge: the result contains
//! exactly the target fields the rules declare, in rule order, and source
//! fields no rule mentions are dropped.

use exchange_model::{FieldRule, Record};
use serde_json::Value;

use crate::transforms::apply_transform;

/// Projected record plus the fields that fell back to a default or could
/// not be transformed.
#[derive(Debug, Clone)]
pub struct MappingOutcome {
    pub record: Record,
    pub warnings: Vec<String>,
}

/// Apply an ordered rule list to a source record.
pub fn apply_mappings(source: &Record, rules: &[FieldRule]) -> Record {
    apply_mappings_with_warnings(source, rules).record
}

/// Apply an ordered rule list, reporting fallbacks on the warnings channel.
///
/// For each rule the value resolves as source field, else `default_value`,
/// else null. A transform applies only to non-null values; when several
/// rules share a target field, the last write wins.
pub fn apply_mappings_with_warnings(source: &Record, rules: &[FieldRule]) -> MappingOutcome {
    let mut record = Record::new();
    let mut warnings = Vec::new();

    for rule in rules {
        let mut value = match source.get(&rule.source_field) {
            Some(value) if !value.is_null() => value.clone(),
            _ => match &rule.default_value {
                Some(default) => {
                    warnings.push(format!(
                        "field `{}` missing; used default",
                        rule.source_field
                    ));
                    default.clone()
                }
                None => {
                    warnings.push(format!("field `{}` missing; mapped as null", rule.source_field));
                    Value::Null
                }
            },
        };

        if !value.is_null() {
            if let Some(transform) = rule.transform {
                match apply_transform(&value, transform) {
                    Some(transformed) => value = transformed,
                    None => warnings.push(format!(
                        "field `{}` value `{}` not accepted by {:?} transform; passed through",
                        rule.source_field, value, transform
                    )),
                }
            }
        }

        record.insert(rule.target_field.clone(), value);
    }

    MappingOutcome { record, warnings }
}
