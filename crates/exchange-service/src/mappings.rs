//! Mapping configuration service.
//!
//! Mappings are referenced by id at processing time, never embedded, so an
//! edit here only affects future processing.

use std::sync::Arc;

use exchange_mapping::{apply_mappings_with_warnings, MappingOutcome};
use exchange_model::{EdiMapping, Id, MappingDraft, MappingPatch, Record, TenantId};
use exchange_store::MappingStore;

use crate::{Error, Result};

pub struct MappingService<S> {
    store: Arc<S>,
}

impl<S: MappingStore> MappingService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list(&self, tenant: &TenantId, partner_id: Option<Id>) -> Result<Vec<EdiMapping>> {
        Ok(self.store.list_mappings(tenant, partner_id).await?)
    }

    pub async fn get(&self, tenant: &TenantId, id: Id) -> Result<EdiMapping> {
        self.store
            .get_mapping(tenant, id)
            .await?
            .ok_or(Error::MappingNotFound { id })
    }

    pub async fn create(&self, tenant: &TenantId, draft: MappingDraft) -> Result<EdiMapping> {
        Ok(self.store.create_mapping(tenant, draft).await?)
    }

    pub async fn update(&self, tenant: &TenantId, id: Id, patch: MappingPatch) -> Result<EdiMapping> {
        if self.store.get_mapping(tenant, id).await?.is_none() {
            return Err(Error::MappingNotFound { id });
        }
        Ok(self.store.update_mapping(tenant, id, patch).await?)
    }

    /// Apply a stored mapping to a record. Used for inbound normalization
    /// and for outbound field-to-wire-format decisions.
    pub async fn apply(
        &self,
        tenant: &TenantId,
        id: Id,
        source: &Record,
    ) -> Result<MappingOutcome> {
        let mapping = self.get(tenant, id).await?;
        Ok(apply_mappings_with_warnings(source, &mapping.rules))
    }
}
