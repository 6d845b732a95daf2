//! Message lifecycle processor.
//!
//! Drives PENDING -> PROCESSING -> {PROCESSED, ERROR} and the explicit
//! ERROR -> PENDING retry re-entry. The PENDING -> PROCESSING claim is an
//! atomic conditional update, so of two concurrent calls against the same
//! message only one finds a PENDING row; the loser reports a lookup
//! failure.
//!
//! Codec dispatch is by (direction, partner format). Combinations without
//! a semantic parser land in an explicit [`ParsedPayload::Unhandled`]
//! outcome rather than silently recording nothing.

use std::sync::Arc;

use chrono::Utc;
use exchange_edifact::{parse_orders_with_warnings, parse_segments, ParsedOrder};
use exchange_model::{
    Direction, EdiMessage, EdiPartner, Id, MessageType, PartnerFormat, TenantId,
};
use exchange_store::{MessageStore, PartnerStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Error, Result};

/// Number of raw lines kept in a flat-file preview.
const FLAT_FILE_PREVIEW_LINES: usize = 5;

/// Longest raw snapshot stored when structured parsing fails.
const RAW_SNAPSHOT_CHARS: usize = 1000;

/// Structured output of one codec dispatch, persisted as the message's
/// parsed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedPayload {
    /// A fully parsed inbound purchase order.
    Order {
        order: ParsedOrder,
        warnings: Vec<String>,
    },
    /// Flat-file content is only previewed here; full typing requires an
    /// explicit schema lookup by the caller.
    FlatFilePreview {
        line_count: usize,
        sample: Vec<String>,
    },
    /// Successfully parsed structured (JSON/XML-as-JSON) content.
    Structured { data: serde_json::Value },
    /// Structured parsing failed; a truncated raw snapshot is kept instead
    /// of failing the message.
    RawSnapshot { content: String },
    /// No parser is implemented for this (format, message type) pair. The
    /// content was accepted but not semantically parsed.
    Unhandled {
        format: PartnerFormat,
        message_type: MessageType,
    },
}

/// Result of a successful `process` call.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub message: EdiMessage,
    pub payload: Option<ParsedPayload>,
}

pub struct MessageProcessor<S> {
    store: Arc<S>,
}

impl<S: MessageStore + PartnerStore> MessageProcessor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Process a PENDING message.
    ///
    /// On success the message ends PROCESSED with its parsed data and
    /// processing timestamp persisted. On failure the message ends ERROR
    /// with the failure recorded, and the error also propagates to the
    /// caller; the durable record is what enables later retry.
    pub async fn process(&self, tenant: &TenantId, id: Id) -> Result<ProcessOutcome> {
        let message = self
            .store
            .claim_pending(tenant, id)
            .await?
            .ok_or(Error::MessageNotPending { id })?;

        match self.dispatch(tenant, &message).await {
            Ok(payload) => {
                let parsed_data = match &payload {
                    Some(payload) => Some(serde_json::to_value(payload).map_err(|e| {
                        Error::Processing {
                            details: format!("could not serialize parsed data: {e}"),
                        }
                    })?),
                    None => None,
                };
                let message = self
                    .store
                    .mark_processed(tenant, id, parsed_data, Utc::now())
                    .await?;
                info!(tenant = %tenant, message = id, "message processed");
                Ok(ProcessOutcome { message, payload })
            }
            Err(error) => {
                warn!(tenant = %tenant, message = id, %error, "message processing failed");
                self.store.mark_error(tenant, id, &error.to_string()).await?;
                Err(error)
            }
        }
    }

    /// Retry a message that ended in ERROR: reset it to PENDING, clear the
    /// recorded failure, and run the full dispatch again.
    pub async fn retry(&self, tenant: &TenantId, id: Id) -> Result<ProcessOutcome> {
        self.store
            .take_error(tenant, id)
            .await?
            .ok_or(Error::MessageNotInError { id })?;
        info!(tenant = %tenant, message = id, "message reset for retry");
        self.process(tenant, id).await
    }

    async fn dispatch(
        &self,
        tenant: &TenantId,
        message: &EdiMessage,
    ) -> Result<Option<ParsedPayload>> {
        // Outbound content is generated upstream, never parsed here
        if message.direction == Direction::Outbound {
            return Ok(None);
        }

        let partner = self
            .store
            .get_partner(tenant, message.partner_id)
            .await?
            .ok_or(Error::Processing {
                details: format!("partner {} not found", message.partner_id),
            })?;

        let raw = message.raw_content.as_deref().unwrap_or("");
        Ok(Some(parse_inbound(&partner, message, raw)?))
    }
}

/// Pure inbound codec dispatch for one message.
fn parse_inbound(
    partner: &EdiPartner,
    message: &EdiMessage,
    raw: &str,
) -> Result<ParsedPayload> {
    match partner.format {
        PartnerFormat::Edifact => {
            let segments = parse_segments(raw);
            if message.message_type == MessageType::Orders {
                let outcome = parse_orders_with_warnings(&segments);
                match outcome.order {
                    Some(order) => Ok(ParsedPayload::Order {
                        order,
                        warnings: outcome.warnings,
                    }),
                    None => Err(Error::Processing {
                        details: "ORDERS content has no BGM segment".to_string(),
                    }),
                }
            } else {
                Ok(ParsedPayload::Unhandled {
                    format: partner.format,
                    message_type: message.message_type,
                })
            }
        }
        PartnerFormat::FlatFile => {
            let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();
            Ok(ParsedPayload::FlatFilePreview {
                line_count: lines.len(),
                sample: lines
                    .iter()
                    .take(FLAT_FILE_PREVIEW_LINES)
                    .map(|l| l.to_string())
                    .collect(),
            })
        }
        PartnerFormat::Xml | PartnerFormat::Json => match serde_json::from_str(raw) {
            Ok(data) => Ok(ParsedPayload::Structured { data }),
            Err(_) => Ok(ParsedPayload::RawSnapshot {
                content: raw.chars().take(RAW_SNAPSHOT_CHARS).collect(),
            }),
        },
    }
}
