//! Partner configuration service.
//!
//! Enforces the unique-code invariant and masks stored credentials on
//! every read path; the literal SFTP password never leaves this service.

use std::sync::Arc;

use exchange_model::{EdiPartner, Id, PartnerDraft, PartnerPatch, TenantId};
use exchange_store::{PartnerFilter, PartnerStore};
use tracing::info;

use crate::{Error, Result};

pub struct PartnerService<S> {
    store: Arc<S>,
}

impl<S: PartnerStore> PartnerService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list(&self, tenant: &TenantId, filter: &PartnerFilter) -> Result<Vec<EdiPartner>> {
        let partners = self.store.list_partners(tenant, filter).await?;
        Ok(partners.iter().map(EdiPartner::masked).collect())
    }

    pub async fn get(&self, tenant: &TenantId, id: Id) -> Result<EdiPartner> {
        self.store
            .get_partner(tenant, id)
            .await?
            .map(|p| p.masked())
            .ok_or(Error::PartnerNotFound { id })
    }

    pub async fn create(&self, tenant: &TenantId, draft: PartnerDraft) -> Result<EdiPartner> {
        if let Some(existing) = self.store.find_partner_by_code(tenant, &draft.code).await? {
            return Err(Error::DuplicatePartnerCode {
                code: existing.code,
            });
        }
        let partner = self.store.create_partner(tenant, draft).await?;
        info!(tenant = %tenant, partner = partner.id, code = %partner.code, "partner registered");
        Ok(partner.masked())
    }

    pub async fn update(&self, tenant: &TenantId, id: Id, patch: PartnerPatch) -> Result<EdiPartner> {
        // Surface a service-level not-found instead of the raw store error
        if self.store.get_partner(tenant, id).await?.is_none() {
            return Err(Error::PartnerNotFound { id });
        }
        let partner = self.store.update_partner(tenant, id, patch).await?;
        Ok(partner.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exchange_model::{PartnerFormat, PartnerStatus, SftpSettings, MASKED_SECRET};
    use exchange_store::MemoryStore;

    fn service() -> PartnerService<MemoryStore> {
        PartnerService::new(Arc::new(MemoryStore::new()))
    }

    fn draft_with_password(code: &str) -> PartnerDraft {
        PartnerDraft {
            code: code.to_string(),
            name: "Partner".to_string(),
            tax_id: None,
            format: PartnerFormat::Edifact,
            sftp: SftpSettings {
                password: Some("hunter2".to_string()),
                ..Default::default()
            },
            webhook_url: None,
            status: PartnerStatus::Active,
            notes: None,
        }
    }

    #[tokio::test]
    async fn credentials_are_masked_on_every_read() {
        let service = service();
        let tenant = TenantId::from("acme");

        let created = service.create(&tenant, draft_with_password("P1")).await.unwrap();
        assert_eq!(created.sftp.password.as_deref(), Some(MASKED_SECRET));

        let fetched = service.get(&tenant, created.id).await.unwrap();
        assert_eq!(fetched.sftp.password.as_deref(), Some(MASKED_SECRET));

        let listed = service.list(&tenant, &PartnerFilter::default()).await.unwrap();
        assert_eq!(listed[0].sftp.password.as_deref(), Some(MASKED_SECRET));
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let service = service();
        let tenant = TenantId::from("acme");

        service.create(&tenant, draft_with_password("P1")).await.unwrap();
        let err = service.create(&tenant, draft_with_password("P1")).await.unwrap_err();
        assert!(matches!(err, Error::DuplicatePartnerCode { .. }));
    }

    #[tokio::test]
    async fn same_code_allowed_across_tenants() {
        let service = service();
        service.create(&TenantId::from("a"), draft_with_password("P1")).await.unwrap();
        service.create(&TenantId::from("b"), draft_with_password("P1")).await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_partner_fails() {
        let service = service();
        let err = service.get(&TenantId::from("acme"), 999).await.unwrap_err();
        assert!(matches!(err, Error::PartnerNotFound { id: 999 }));
    }
}
