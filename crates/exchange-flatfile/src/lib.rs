//! # exchange-flatfile
//!
//! Fixed-width flat-file codec: each field occupies a known character
//! offset and length within a line.
//!
//! Parsing and generation are lenient and infallible; only schema loading
//! from definition files can fail.

pub mod reader;
pub mod schema;
pub mod writer;

pub use reader::{parse_content, parse_line};
pub use schema::{FieldDef, FieldType, FlatFileSchema};
pub use writer::{generate_content, generate_line};

use thiserror::Error;

/// Errors that can occur when loading a flat-file schema definition.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema definition error: {0}")]
    Schema(String),
}

pub type Result<T> = std::result::Result<T, Error>;
