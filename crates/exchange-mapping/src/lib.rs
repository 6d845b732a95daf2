//! # exchange-mapping
//!
//! Declarative field-mapping engine: applies an ordered list of
//! source-to-target rules to project one record shape into another, with a
//! fixed set of value transforms.
//!
//! Transforms are infallible by contract; inputs a transform cannot handle
//! pass through unchanged and are reported on the warnings channel.

pub mod engine;
pub mod transforms;

pub use engine::{apply_mappings, apply_mappings_with_warnings, MappingOutcome};
pub use transforms::apply_transform;
