//! Concurrent in-memory store.
//!
//! Dashmap-backed tables keyed by id. Conditional transitions run under the
//! entry lock, which gives the "only one concurrent processor wins"
//! property the lifecycle relies on.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use exchange_model::{
    EdiMapping, EdiMessage, EdiPartner, Id, MappingDraft, MappingPatch, MessageDraft,
    MessageStatus, PartnerDraft, PartnerPatch, PartnerStatus, TenantId,
};
use serde_json::Value;
use tracing::debug;

use crate::traits::{
    MappingStore, MessageFilter, MessageStore, Page, PartnerFilter, PartnerStore,
};
use crate::{Error, Result};

/// In-memory implementation of the store traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    partners: DashMap<Id, EdiPartner>,
    messages: DashMap<Id, EdiMessage>,
    mappings: DashMap<Id, EdiMapping>,
    sequence: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> Id {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl PartnerStore for MemoryStore {
    async fn create_partner(&self, tenant: &TenantId, draft: PartnerDraft) -> Result<EdiPartner> {
        let partner = EdiPartner {
            id: self.next_id(),
            tenant: tenant.clone(),
            code: draft.code,
            name: draft.name,
            tax_id: draft.tax_id,
            format: draft.format,
            sftp: draft.sftp,
            webhook_url: draft.webhook_url,
            status: draft.status,
            notes: draft.notes,
            created_at: Utc::now(),
        };
        debug!(tenant = %tenant, partner = partner.id, code = %partner.code, "partner created");
        self.partners.insert(partner.id, partner.clone());
        Ok(partner)
    }

    async fn get_partner(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiPartner>> {
        Ok(self
            .partners
            .get(&id)
            .filter(|p| &p.tenant == tenant)
            .map(|p| p.value().clone()))
    }

    async fn find_partner_by_code(
        &self,
        tenant: &TenantId,
        code: &str,
    ) -> Result<Option<EdiPartner>> {
        Ok(self
            .partners
            .iter()
            .find(|p| &p.tenant == tenant && p.code == code)
            .map(|p| p.value().clone()))
    }

    async fn list_partners(
        &self,
        tenant: &TenantId,
        filter: &PartnerFilter,
    ) -> Result<Vec<EdiPartner>> {
        let mut partners: Vec<EdiPartner> = self
            .partners
            .iter()
            .filter(|p| &p.tenant == tenant)
            .filter(|p| filter.status.is_none_or(|status| p.status == status))
            .filter(|p| {
                filter.search.as_deref().is_none_or(|needle| {
                    let needle = needle.to_lowercase();
                    p.code.to_lowercase().contains(&needle)
                        || p.name.to_lowercase().contains(&needle)
                })
            })
            .map(|p| p.value().clone())
            .collect();
        partners.sort_by_key(|p| p.id);
        Ok(partners)
    }

    async fn update_partner(
        &self,
        tenant: &TenantId,
        id: Id,
        patch: PartnerPatch,
    ) -> Result<EdiPartner> {
        let mut entry = self
            .partners
            .get_mut(&id)
            .filter(|p| &p.tenant == tenant)
            .ok_or(Error::NotFound {
                entity: "partner",
                id,
            })?;

        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(tax_id) = patch.tax_id {
            entry.tax_id = Some(tax_id);
        }
        if let Some(format) = patch.format {
            entry.format = format;
        }
        if let Some(sftp) = patch.sftp {
            entry.sftp = sftp;
        }
        if let Some(webhook_url) = patch.webhook_url {
            entry.webhook_url = Some(webhook_url);
        }
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }
        Ok(entry.value().clone())
    }

    async fn count_partners(&self, tenant: &TenantId) -> Result<usize> {
        Ok(self.partners.iter().filter(|p| &p.tenant == tenant).count())
    }

    async fn count_partners_with_status(
        &self,
        tenant: &TenantId,
        status: PartnerStatus,
    ) -> Result<usize> {
        Ok(self
            .partners
            .iter()
            .filter(|p| &p.tenant == tenant && p.status == status)
            .count())
    }
}

impl MessageStore for MemoryStore {
    async fn create_message(&self, tenant: &TenantId, draft: MessageDraft) -> Result<EdiMessage> {
        let message = EdiMessage {
            id: self.next_id(),
            tenant: tenant.clone(),
            partner_id: draft.partner_id,
            message_type: draft.message_type,
            direction: draft.direction,
            status: MessageStatus::Pending,
            raw_content: draft.raw_content,
            parsed_data: None,
            reference: draft.reference,
            file_name: draft.file_name,
            order_id: draft.order_id,
            invoice_id: draft.invoice_id,
            error_message: None,
            processed_at: None,
            created_at: Utc::now(),
        };
        debug!(tenant = %tenant, message = message.id, "message created");
        self.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn get_message(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMessage>> {
        Ok(self
            .messages
            .get(&id)
            .filter(|m| &m.tenant == tenant)
            .map(|m| m.value().clone()))
    }

    async fn list_messages(
        &self,
        tenant: &TenantId,
        filter: &MessageFilter,
        page: Page,
    ) -> Result<Vec<EdiMessage>> {
        let mut messages: Vec<EdiMessage> = self
            .messages
            .iter()
            .filter(|m| &m.tenant == tenant)
            .filter(|m| filter.partner_id.is_none_or(|id| m.partner_id == id))
            .filter(|m| filter.status.is_none_or(|status| m.status == status))
            .filter(|m| {
                filter
                    .direction
                    .is_none_or(|direction| m.direction == direction)
            })
            .map(|m| m.value().clone())
            .collect();
        // Newest first, like the surrounding application lists them
        messages.sort_by_key(|m| std::cmp::Reverse(m.id));
        Ok(messages
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect())
    }

    async fn claim_pending(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMessage>> {
        let claimed = self
            .messages
            .get_mut(&id)
            .filter(|m| &m.tenant == tenant && m.status == MessageStatus::Pending)
            .map(|mut m| {
                m.status = MessageStatus::Processing;
                m.value().clone()
            });
        if claimed.is_some() {
            debug!(tenant = %tenant, message = id, "message claimed for processing");
        }
        Ok(claimed)
    }

    async fn take_error(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMessage>> {
        Ok(self
            .messages
            .get_mut(&id)
            .filter(|m| &m.tenant == tenant && m.status == MessageStatus::Error)
            .map(|mut m| {
                m.status = MessageStatus::Pending;
                m.error_message = None;
                m.value().clone()
            }))
    }

    async fn mark_processed(
        &self,
        tenant: &TenantId,
        id: Id,
        parsed_data: Option<Value>,
        processed_at: DateTime<Utc>,
    ) -> Result<EdiMessage> {
        let mut entry = self
            .messages
            .get_mut(&id)
            .filter(|m| &m.tenant == tenant)
            .ok_or(Error::NotFound {
                entity: "message",
                id,
            })?;
        entry.status = MessageStatus::Processed;
        entry.parsed_data = parsed_data;
        entry.processed_at = Some(processed_at);
        entry.error_message = None;
        Ok(entry.value().clone())
    }

    async fn mark_error(
        &self,
        tenant: &TenantId,
        id: Id,
        error_message: &str,
    ) -> Result<EdiMessage> {
        let mut entry = self
            .messages
            .get_mut(&id)
            .filter(|m| &m.tenant == tenant)
            .ok_or(Error::NotFound {
                entity: "message",
                id,
            })?;
        entry.status = MessageStatus::Error;
        entry.error_message = Some(error_message.to_string());
        Ok(entry.value().clone())
    }

    async fn count_messages(&self, tenant: &TenantId) -> Result<usize> {
        Ok(self.messages.iter().filter(|m| &m.tenant == tenant).count())
    }

    async fn count_messages_with_status(
        &self,
        tenant: &TenantId,
        status: MessageStatus,
    ) -> Result<usize> {
        Ok(self
            .messages
            .iter()
            .filter(|m| &m.tenant == tenant && m.status == status)
            .count())
    }

    async fn count_processed_since(
        &self,
        tenant: &TenantId,
        since: DateTime<Utc>,
    ) -> Result<usize> {
        Ok(self
            .messages
            .iter()
            .filter(|m| &m.tenant == tenant)
            .filter(|m| m.processed_at.is_some_and(|at| at >= since))
            .count())
    }
}

impl MappingStore for MemoryStore {
    async fn create_mapping(&self, tenant: &TenantId, draft: MappingDraft) -> Result<EdiMapping> {
        let mapping = EdiMapping {
            id: self.next_id(),
            tenant: tenant.clone(),
            partner_id: draft.partner_id,
            message_type: draft.message_type,
            direction: draft.direction,
            name: draft.name,
            description: draft.description,
            rules: draft.rules,
            is_active: draft.is_active,
            created_at: Utc::now(),
        };
        self.mappings.insert(mapping.id, mapping.clone());
        Ok(mapping)
    }

    async fn get_mapping(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMapping>> {
        Ok(self
            .mappings
            .get(&id)
            .filter(|m| &m.tenant == tenant)
            .map(|m| m.value().clone()))
    }

    async fn list_mappings(
        &self,
        tenant: &TenantId,
        partner_id: Option<Id>,
    ) -> Result<Vec<EdiMapping>> {
        let mut mappings: Vec<EdiMapping> = self
            .mappings
            .iter()
            .filter(|m| &m.tenant == tenant)
            .filter(|m| partner_id.is_none_or(|id| m.partner_id == id))
            .map(|m| m.value().clone())
            .collect();
        mappings.sort_by_key(|m| m.id);
        Ok(mappings)
    }

    async fn update_mapping(
        &self,
        tenant: &TenantId,
        id: Id,
        patch: MappingPatch,
    ) -> Result<EdiMapping> {
        let mut entry = self
            .mappings
            .get_mut(&id)
            .filter(|m| &m.tenant == tenant)
            .ok_or(Error::NotFound {
                entity: "mapping",
                id,
            })?;
        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(description) = patch.description {
            entry.description = Some(description);
        }
        if let Some(rules) = patch.rules {
            entry.rules = rules;
        }
        if let Some(is_active) = patch.is_active {
            entry.is_active = is_active;
        }
        Ok(entry.value().clone())
    }
}
