//! # exchange-service
//!
//! Orchestration layer of the EDI exchange core: partner and mapping
//! configuration services, the message service, the message lifecycle
//! processor, and exchange statistics.
//!
//! Services are thin over the store traits; all parsing and generation is
//! delegated to the codec crates. Only this layer has throwing failure
//! paths, and processing failures are always persisted onto the message
//! before they propagate.

pub mod mappings;
pub mod messages;
pub mod partners;
pub mod processor;
pub mod stats;

pub use mappings::MappingService;
pub use messages::MessageService;
pub use partners::PartnerService;
pub use processor::{MessageProcessor, ParsedPayload, ProcessOutcome};
pub use stats::ExchangeStats;

use thiserror::Error;

/// Errors surfaced by the orchestration layer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Partner {id} not found")]
    PartnerNotFound { id: i64 },

    #[error("Partner code `{code}` already exists")]
    DuplicatePartnerCode { code: String },

    #[error("Mapping {id} not found")]
    MappingNotFound { id: i64 },

    #[error("Message {id} not found")]
    MessageNotFound { id: i64 },

    #[error("Message {id} not found or already processed")]
    MessageNotPending { id: i64 },

    #[error("Message {id} not found or not in error")]
    MessageNotInError { id: i64 },

    #[error("Processing failed: {details}")]
    Processing { details: String },

    #[error(transparent)]
    Store(#[from] exchange_store::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
