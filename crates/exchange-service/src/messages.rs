//! Message service.
//!
//! Creation and listing of interchange messages, plus the outbound
//! generation path: structured shipment/invoice data goes through the
//! EDIFACT generators and the wire text is attached to a new OUTBOUND
//! message.

use std::sync::Arc;

use exchange_edifact::{generate_desadv, generate_invoic, DesadvData, InvoicData};
use exchange_flatfile::FlatFileSchema;
use exchange_model::{
    EdiMessage, Id, MessageDraft, MessageType, Record, TenantId,
};
use exchange_store::{MessageFilter, MessageStore, Page, PartnerStore};
use tracing::info;

use crate::{Error, Result};

pub struct MessageService<S> {
    store: Arc<S>,
}

impl<S: MessageStore + PartnerStore> MessageService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        tenant: &TenantId,
        filter: &MessageFilter,
        page: Page,
    ) -> Result<Vec<EdiMessage>> {
        Ok(self.store.list_messages(tenant, filter, page).await?)
    }

    pub async fn get(&self, tenant: &TenantId, id: Id) -> Result<EdiMessage> {
        self.store
            .get_message(tenant, id)
            .await?
            .ok_or(Error::MessageNotFound { id })
    }

    /// Record an arriving or to-be-sent interchange. The partner must
    /// exist; new messages always start PENDING.
    pub async fn create(&self, tenant: &TenantId, draft: MessageDraft) -> Result<EdiMessage> {
        if self.store.get_partner(tenant, draft.partner_id).await?.is_none() {
            return Err(Error::PartnerNotFound {
                id: draft.partner_id,
            });
        }
        Ok(self.store.create_message(tenant, draft).await?)
    }

    /// Generate a dispatch advice and attach it to a new OUTBOUND message.
    pub async fn send_desadv(
        &self,
        tenant: &TenantId,
        partner_id: Id,
        data: &DesadvData,
    ) -> Result<EdiMessage> {
        let raw = generate_desadv(data);
        let draft = MessageDraft::outbound(partner_id, MessageType::Desadv, raw)
            .with_reference(&data.shipment_number);
        let message = self.create(tenant, draft).await?;
        info!(tenant = %tenant, message = message.id, shipment = %data.shipment_number, "DESADV generated");
        Ok(message)
    }

    /// Generate an invoice and attach it to a new OUTBOUND message.
    pub async fn send_invoic(
        &self,
        tenant: &TenantId,
        partner_id: Id,
        data: &InvoicData,
    ) -> Result<EdiMessage> {
        let raw = generate_invoic(data);
        let draft = MessageDraft::outbound(partner_id, MessageType::Invoic, raw)
            .with_reference(&data.invoice_number);
        let message = self.create(tenant, draft).await?;
        info!(tenant = %tenant, message = message.id, invoice = %data.invoice_number, "INVOIC generated");
        Ok(message)
    }

    /// Parse a flat-file message's raw content against an explicit schema.
    ///
    /// The processor itself only records a raw preview for flat files; full
    /// typing requires the caller to supply the field schema, which is what
    /// this does.
    pub async fn parse_flat_file(
        &self,
        tenant: &TenantId,
        id: Id,
        schema: &FlatFileSchema,
    ) -> Result<Vec<Record>> {
        let message = self.get(tenant, id).await?;
        let raw = message.raw_content.as_deref().unwrap_or("");
        Ok(exchange_flatfile::parse_content(raw, &schema.fields))
    }
}
