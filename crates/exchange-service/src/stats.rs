//! Per-tenant exchange statistics.

use chrono::{NaiveTime, Utc};
use exchange_model::{MessageStatus, PartnerStatus, TenantId};
use exchange_store::{MessageStore, PartnerStore};
use serde::Serialize;

use crate::Result;

/// Aggregate counters for one tenant's dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeStats {
    pub total_partners: usize,
    pub active_partners: usize,
    pub total_messages: usize,
    pub pending_messages: usize,
    pub error_messages: usize,
    pub processed_today: usize,
}

impl ExchangeStats {
    /// Collect current counters for the tenant. "Today" is the current UTC
    /// day, not a sliding 24h window.
    pub async fn collect<S>(store: &S, tenant: &TenantId) -> Result<Self>
    where
        S: MessageStore + PartnerStore,
    {
        let midnight = Utc::now()
            .with_time(NaiveTime::MIN)
            .single()
            .unwrap_or_else(Utc::now);

        Ok(Self {
            total_partners: store.count_partners(tenant).await?,
            active_partners: store
                .count_partners_with_status(tenant, PartnerStatus::Active)
                .await?,
            total_messages: store.count_messages(tenant).await?,
            pending_messages: store
                .count_messages_with_status(tenant, MessageStatus::Pending)
                .await?,
            error_messages: store
                .count_messages_with_status(tenant, MessageStatus::Error)
                .await?,
            processed_today: store.count_processed_since(tenant, midnight).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use exchange_model::{MessageDraft, MessageType, PartnerDraft, PartnerFormat};
    use exchange_store::{MemoryStore, MessageStore, PartnerStore};

    #[tokio::test]
    async fn collect_counts_by_status_and_tenant() {
        let store = Arc::new(MemoryStore::new());
        let tenant = TenantId::from("acme");
        let other = TenantId::from("globex");

        let partner = store
            .create_partner(
                &tenant,
                PartnerDraft {
                    code: "P1".to_string(),
                    name: "Partner".to_string(),
                    tax_id: None,
                    format: PartnerFormat::Edifact,
                    sftp: Default::default(),
                    webhook_url: None,
                    status: exchange_model::PartnerStatus::Active,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let m1 = store
            .create_message(
                &tenant,
                MessageDraft::inbound(partner.id, MessageType::Orders, "x"),
            )
            .await
            .unwrap();
        store
            .create_message(
                &tenant,
                MessageDraft::inbound(partner.id, MessageType::Orders, "y"),
            )
            .await
            .unwrap();

        store.claim_pending(&tenant, m1.id).await.unwrap();
        store
            .mark_processed(&tenant, m1.id, None, Utc::now())
            .await
            .unwrap();

        let stats = ExchangeStats::collect(store.as_ref(), &tenant).await.unwrap();
        assert_eq!(stats.total_partners, 1);
        assert_eq!(stats.active_partners, 1);
        assert_eq!(stats.total_messages, 2);
        assert_eq!(stats.pending_messages, 1);
        assert_eq!(stats.error_messages, 0);
        assert_eq!(stats.processed_today, 1);

        let empty = ExchangeStats::collect(store.as_ref(), &other).await.unwrap();
        assert_eq!(empty.total_messages, 0);
        assert_eq!(empty.total_partners, 0);
    }

    #[test]
    fn serializes_camel_case() {
        let stats = ExchangeStats {
            total_partners: 1,
            active_partners: 1,
            total_messages: 3,
            pending_messages: 1,
            error_messages: 1,
            processed_today: 1,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert!(value.get("processedToday").is_some());
        assert!(value.get("pendingMessages").is_some());
    }
}
