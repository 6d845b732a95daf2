//! Interchange messages.
//!
//! An [`EdiMessage`] is a single inbound or outbound interchange instance
//! tied to one partner. Messages are mutated only by the processor and are
//! never deleted by the core; retention is an external concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tenancy::TenantId;
use crate::Id;

/// EDIFACT message type of an interchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Orders,
    Ordrsp,
    Desadv,
    Invoic,
    Recadv,
    Pricat,
    Invrpt,
    Other,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageType::Orders => "ORDERS",
            MessageType::Ordrsp => "ORDRSP",
            MessageType::Desadv => "DESADV",
            MessageType::Invoic => "INVOIC",
            MessageType::Recadv => "RECADV",
            MessageType::Pricat => "PRICAT",
            MessageType::Invrpt => "INVRPT",
            MessageType::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// Message direction relative to this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// Processing state. Only PENDING -> PROCESSING -> {PROCESSED, ERROR} is
/// legal; ERROR re-enters at PENDING via an explicit retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Pending,
    Processing,
    Processed,
    Error,
}

/// A single interchange instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdiMessage {
    pub id: Id,
    pub tenant: TenantId,
    pub partner_id: Id,
    pub message_type: MessageType,
    pub direction: Direction,
    pub status: MessageStatus,
    /// Wire-format text as received or generated.
    pub raw_content: Option<String>,
    /// Structured output of the codec dispatch.
    pub parsed_data: Option<serde_json::Value>,
    /// Reference number or document number carried by the interchange.
    pub reference: Option<String>,
    pub file_name: Option<String>,
    /// Link to a related order entity in the surrounding ERP.
    pub order_id: Option<Id>,
    /// Link to a related invoice entity in the surrounding ERP.
    pub invoice_id: Option<Id>,
    pub error_message: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a message. New messages always start PENDING.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDraft {
    pub partner_id: Id,
    pub message_type: MessageType,
    pub direction: Direction,
    #[serde(default)]
    pub raw_content: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub order_id: Option<Id>,
    #[serde(default)]
    pub invoice_id: Option<Id>,
}

impl MessageDraft {
    pub fn inbound(partner_id: Id, message_type: MessageType, raw_content: impl Into<String>) -> Self {
        Self {
            partner_id,
            message_type,
            direction: Direction::Inbound,
            raw_content: Some(raw_content.into()),
            reference: None,
            file_name: None,
            order_id: None,
            invoice_id: None,
        }
    }

    pub fn outbound(partner_id: Id, message_type: MessageType, raw_content: impl Into<String>) -> Self {
        Self {
            partner_id,
            message_type,
            direction: Direction::Outbound,
            raw_content: Some(raw_content.into()),
            reference: None,
            file_name: None,
            order_id: None,
            invoice_id: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}
