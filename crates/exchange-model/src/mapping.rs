//! Field-mapping definitions.
//!
//! An [`EdiMapping`] is a named, reusable list of source-to-target field
//! rules bound to a partner, message type, and direction. Mappings are
//! referenced by id at processing time, so edits affect future processing
//! only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{Direction, MessageType};
use crate::tenancy::TenantId;
use crate::Id;

/// Value transform applied by a field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTransform {
    Uppercase,
    Lowercase,
    Trim,
    /// Numeric coercion; non-numeric input yields 0, never NaN.
    Number,
    /// Reformat to `YYYY-MM-DD`; unparseable input passes through and is
    /// reported on the warnings channel.
    Date,
    /// Strip non-digits and left-pad with zeros to 14 digits.
    Cnpj,
    None,
}

/// One source-to-target rule. Evaluation order is significant when several
/// rules share a target: last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRule {
    pub source_field: String,
    pub target_field: String,
    #[serde(default)]
    pub transform: Option<FieldTransform>,
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
}

impl FieldRule {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_field: source.into(),
            target_field: target.into(),
            transform: None,
            default_value: None,
        }
    }

    pub fn with_transform(mut self, transform: FieldTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default_value = Some(default.into());
        self
    }
}

/// A stored mapping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdiMapping {
    pub id: Id,
    pub tenant: TenantId,
    pub partner_id: Id,
    pub message_type: MessageType,
    pub direction: Direction,
    pub name: String,
    pub description: Option<String>,
    pub rules: Vec<FieldRule>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingDraft {
    pub partner_id: Id,
    pub message_type: MessageType,
    pub direction: Direction,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<FieldRule>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// In-place update of a mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Option<Vec<FieldRule>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}
