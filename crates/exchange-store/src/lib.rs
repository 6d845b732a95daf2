//! # exchange-store
//!
//! Persistence boundary of the exchange core: tenant-scoped stores for
//! partners, messages, and mappings, plus a concurrent in-memory
//! implementation used by tests and the CLI.
//!
//! The surrounding ERP plugs its real persistence in behind these traits.
//! The message store is where the lifecycle's concurrency control lives:
//! [`MessageStore::claim_pending`] and [`MessageStore::take_error`] are
//! atomic conditional updates, so only one concurrent processor can win a
//! given message.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{
    ExchangeStore, MappingStore, MessageFilter, MessageStore, Page, PartnerFilter, PartnerStore,
};

use thiserror::Error;

/// Errors that can occur at the persistence boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Storage error: {details}")]
    Storage { details: String },
}

pub type Result<T> = std::result::Result<T, Error>;
