//! Fixed-width field schemas.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Data type of a fixed-width field.
///
/// `Date` fields are not auto-converted by the parser; they remain raw
/// strings and interpretation is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Date,
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::String
    }
}

/// One field window within a line. Fields are addressed by explicit
/// `start`/`length`, so they may be contiguous, overlap, or leave gaps, and
/// schema order is independent of position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub start: usize,
    pub length: usize,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Format hint for date fields (e.g. `YYYYMMDD`); informational only.
    #[serde(default)]
    pub format: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, start: usize, length: usize) -> Self {
        Self {
            name: name.into(),
            start,
            length,
            field_type: FieldType::String,
            format: None,
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// A named, ordered list of field definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFileSchema {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl FlatFileSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Load a schema from a YAML definition.
    pub fn from_yaml(input: &str) -> Result<Self> {
        serde_yaml::from_str(input).map_err(|e| Error::Schema(e.to_string()))
    }

    /// Load a schema from a JSON definition.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| Error::Schema(e.to_string()))
    }

    /// Total line width implied by the schema (end of the furthest field).
    pub fn line_width(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.start + f.length)
            .max()
            .unwrap_or(0)
    }
}
