//! # exchange-model
//!
//! Shared domain model for the EDI exchange core.
//!
//! This crate defines the tenant-scoped records that every other layer
//! consumes: trading partner configuration, interchange messages, and
//! field-mapping definitions, together with their format/type/status enums.

pub mod mapping;
pub mod message;
pub mod partner;
pub mod tenancy;

pub use mapping::{EdiMapping, FieldRule, FieldTransform, MappingDraft, MappingPatch};
pub use message::{Direction, EdiMessage, MessageDraft, MessageStatus, MessageType};
pub use partner::{EdiPartner, PartnerDraft, PartnerFormat, PartnerPatch, PartnerStatus, SftpSettings, MASKED_SECRET};
pub use tenancy::TenantId;

/// Entity identifier assigned by the persistence layer.
pub type Id = i64;

/// A loosely typed record, as produced by the codecs and consumed by the
/// field-mapping engine.
pub type Record = serde_json::Map<String, serde_json::Value>;
