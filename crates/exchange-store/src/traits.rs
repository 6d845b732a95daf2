//! Store traits.
//!
//! Every operation is tenant-scoped: a record belonging to another tenant
//! behaves exactly like a missing record. Reads of conditional transitions
//! return `None` rather than an error when the precondition does not hold;
//! the caller turns that into its own "not found or wrong state" failure.

use chrono::{DateTime, Utc};
use exchange_model::{
    Direction, EdiMapping, EdiMessage, EdiPartner, Id, MappingDraft, MappingPatch, MessageDraft,
    MessageStatus, PartnerDraft, PartnerPatch, PartnerStatus, TenantId,
};
use serde_json::Value;

use crate::Result;

/// Pagination window for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// Filter for partner listings.
#[derive(Debug, Clone, Default)]
pub struct PartnerFilter {
    pub status: Option<PartnerStatus>,
    pub search: Option<String>,
}

/// Filter for message listings.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub partner_id: Option<Id>,
    pub status: Option<MessageStatus>,
    pub direction: Option<Direction>,
}

/// Trading partner persistence.
#[allow(async_fn_in_trait)]
pub trait PartnerStore {
    async fn create_partner(&self, tenant: &TenantId, draft: PartnerDraft) -> Result<EdiPartner>;
    async fn get_partner(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiPartner>>;
    async fn find_partner_by_code(
        &self,
        tenant: &TenantId,
        code: &str,
    ) -> Result<Option<EdiPartner>>;
    async fn list_partners(
        &self,
        tenant: &TenantId,
        filter: &PartnerFilter,
    ) -> Result<Vec<EdiPartner>>;
    async fn update_partner(
        &self,
        tenant: &TenantId,
        id: Id,
        patch: PartnerPatch,
    ) -> Result<EdiPartner>;
    async fn count_partners(&self, tenant: &TenantId) -> Result<usize>;
    async fn count_partners_with_status(
        &self,
        tenant: &TenantId,
        status: PartnerStatus,
    ) -> Result<usize>;
}

/// Interchange message persistence.
#[allow(async_fn_in_trait)]
pub trait MessageStore {
    async fn create_message(&self, tenant: &TenantId, draft: MessageDraft) -> Result<EdiMessage>;
    async fn get_message(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMessage>>;
    async fn list_messages(
        &self,
        tenant: &TenantId,
        filter: &MessageFilter,
        page: Page,
    ) -> Result<Vec<EdiMessage>>;

    /// Atomically transition PENDING -> PROCESSING and return the claimed
    /// message. `None` when the message is absent, belongs to another
    /// tenant, or is not PENDING.
    async fn claim_pending(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMessage>>;

    /// Atomically transition ERROR -> PENDING, clearing the error message.
    /// `None` when the message is absent or not in ERROR.
    async fn take_error(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMessage>>;

    async fn mark_processed(
        &self,
        tenant: &TenantId,
        id: Id,
        parsed_data: Option<Value>,
        processed_at: DateTime<Utc>,
    ) -> Result<EdiMessage>;

    async fn mark_error(
        &self,
        tenant: &TenantId,
        id: Id,
        error_message: &str,
    ) -> Result<EdiMessage>;

    async fn count_messages(&self, tenant: &TenantId) -> Result<usize>;
    async fn count_messages_with_status(
        &self,
        tenant: &TenantId,
        status: MessageStatus,
    ) -> Result<usize>;
    async fn count_processed_since(
        &self,
        tenant: &TenantId,
        since: DateTime<Utc>,
    ) -> Result<usize>;
}

/// Field-mapping persistence.
#[allow(async_fn_in_trait)]
pub trait MappingStore {
    async fn create_mapping(&self, tenant: &TenantId, draft: MappingDraft) -> Result<EdiMapping>;
    async fn get_mapping(&self, tenant: &TenantId, id: Id) -> Result<Option<EdiMapping>>;
    async fn list_mappings(
        &self,
        tenant: &TenantId,
        partner_id: Option<Id>,
    ) -> Result<Vec<EdiMapping>>;
    async fn update_mapping(
        &self,
        tenant: &TenantId,
        id: Id,
        patch: MappingPatch,
    ) -> Result<EdiMapping>;
}

/// The full persistence surface the services consume.
pub trait ExchangeStore: PartnerStore + MessageStore + MappingStore + Send + Sync {}

impl<S> ExchangeStore for S where S: PartnerStore + MessageStore + MappingStore + Send + Sync {}
