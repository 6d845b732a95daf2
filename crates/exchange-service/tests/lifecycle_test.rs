//! End-to-end message lifecycle over the in-memory store: create, claim,
//! process, fail, retry.

use std::sync::Arc;

use exchange_model::{
    Direction, MessageDraft, MessageStatus, MessageType, PartnerDraft, PartnerFormat,
    PartnerStatus, SftpSettings, TenantId,
};
use exchange_service::{
    Error, MessageProcessor, MessageService, ParsedPayload, PartnerService,
};
use exchange_store::{MemoryStore, MessageStore};

const SAMPLE_ORDERS: &str = "UNH+1+ORDERS:D:96A:UN'\
BGM+220+PO-2026-001+9'\
DTM+137:20260115:102'\
NAD+BY+5411234567890::9'\
LIN+1++7891000100103:SA'\
QTY+21:120'\
PRI+AAA:4.35'\
UNT+8+1'";

struct Harness {
    store: Arc<MemoryStore>,
    partners: PartnerService<MemoryStore>,
    messages: MessageService<MemoryStore>,
    processor: MessageProcessor<MemoryStore>,
    tenant: TenantId,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            partners: PartnerService::new(store.clone()),
            messages: MessageService::new(store.clone()),
            processor: MessageProcessor::new(store.clone()),
            store,
            tenant: TenantId::from("acme"),
        }
    }

    async fn edifact_partner(&self) -> i64 {
        self.partners
            .create(
                &self.tenant,
                PartnerDraft {
                    code: "SUPERMERC".to_string(),
                    name: "Supermercado Central".to_string(),
                    tax_id: None,
                    format: PartnerFormat::Edifact,
                    sftp: SftpSettings::default(),
                    webhook_url: None,
                    status: PartnerStatus::Active,
                    notes: None,
                },
            )
            .await
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn inbound_orders_ends_processed_with_parsed_data() {
    let h = Harness::new();
    let partner_id = h.edifact_partner().await;

    let message = h
        .messages
        .create(
            &h.tenant,
            MessageDraft::inbound(partner_id, MessageType::Orders, SAMPLE_ORDERS),
        )
        .await
        .unwrap();
    assert_eq!(message.status, MessageStatus::Pending);

    let outcome = h.processor.process(&h.tenant, message.id).await.unwrap();
    assert_eq!(outcome.message.status, MessageStatus::Processed);
    assert!(outcome.message.processed_at.is_some());
    assert!(outcome.message.error_message.is_none());

    match outcome.payload.unwrap() {
        ParsedPayload::Order { order, warnings } => {
            assert_eq!(order.order_number, "PO-2026-001");
            assert_eq!(order.buyer_code, "5411234567890");
            assert_eq!(order.items.len(), 1);
            assert!(warnings.is_empty());
        }
        other => panic!("expected order payload, got {other:?}"),
    }

    let stored = h.messages.get(&h.tenant, message.id).await.unwrap();
    let parsed = stored.parsed_data.unwrap();
    assert_eq!(parsed["kind"], "order");
    assert_eq!(parsed["order"]["order_number"], "PO-2026-001");
}

#[tokio::test]
async fn processing_a_non_pending_message_fails() {
    let h = Harness::new();
    let partner_id = h.edifact_partner().await;

    let message = h
        .messages
        .create(
            &h.tenant,
            MessageDraft::inbound(partner_id, MessageType::Orders, SAMPLE_ORDERS),
        )
        .await
        .unwrap();

    h.processor.process(&h.tenant, message.id).await.unwrap();

    let err = h.processor.process(&h.tenant, message.id).await.unwrap_err();
    assert!(matches!(err, Error::MessageNotPending { .. }));
    assert_eq!(
        err.to_string(),
        format!("Message {} not found or already processed", message.id)
    );
}

#[tokio::test]
async fn failed_processing_records_error_and_retry_reruns() {
    let h = Harness::new();
    let partner_id = h.edifact_partner().await;

    // no BGM segment, so ORDERS parsing cannot produce an order
    let message = h
        .messages
        .create(
            &h.tenant,
            MessageDraft::inbound(partner_id, MessageType::Orders, "DTM+137:20260115:102'"),
        )
        .await
        .unwrap();

    let err = h.processor.process(&h.tenant, message.id).await.unwrap_err();
    assert!(matches!(err, Error::Processing { .. }));

    let stored = h.messages.get(&h.tenant, message.id).await.unwrap();
    assert_eq!(stored.status, MessageStatus::Error);
    assert!(stored.error_message.unwrap().contains("BGM"));

    // retry with the same broken content fails again, message stays ERROR
    let err = h.processor.retry(&h.tenant, message.id).await.unwrap_err();
    assert!(matches!(err, Error::Processing { .. }));
    let stored = h.messages.get(&h.tenant, message.id).await.unwrap();
    assert_eq!(stored.status, MessageStatus::Error);
}

#[tokio::test]
async fn retry_requires_error_status() {
    let h = Harness::new();
    let partner_id = h.edifact_partner().await;

    let message = h
        .messages
        .create(
            &h.tenant,
            MessageDraft::inbound(partner_id, MessageType::Orders, SAMPLE_ORDERS),
        )
        .await
        .unwrap();

    let err = h.processor.retry(&h.tenant, message.id).await.unwrap_err();
    assert!(matches!(err, Error::MessageNotInError { .. }));
    assert_eq!(
        err.to_string(),
        format!("Message {} not found or not in error", message.id)
    );
}

#[tokio::test]
async fn concurrent_claims_have_a_single_winner() {
    let h = Harness::new();
    let partner_id = h.edifact_partner().await;

    let message = h
        .messages
        .create(
            &h.tenant,
            MessageDraft::inbound(partner_id, MessageType::Orders, SAMPLE_ORDERS),
        )
        .await
        .unwrap();

    let first = h.store.claim_pending(&h.tenant, message.id).await.unwrap();
    let second = h.store.claim_pending(&h.tenant, message.id).await.unwrap();
    assert!(first.is_some());
    assert!(second.is_none());
}

#[tokio::test]
async fn outbound_messages_process_without_parsing() {
    let h = Harness::new();
    let partner_id = h.edifact_partner().await;

    let message = h
        .messages
        .create(
            &h.tenant,
            MessageDraft::outbound(partner_id, MessageType::Invoic, "BGM+380+INV-1+9'")
                .with_reference("INV-1"),
        )
        .await
        .unwrap();
    assert_eq!(message.direction, Direction::Outbound);

    let outcome = h.processor.process(&h.tenant, message.id).await.unwrap();
    assert_eq!(outcome.message.status, MessageStatus::Processed);
    assert!(outcome.payload.is_none());
    assert!(outcome.message.parsed_data.is_none());
}

#[tokio::test]
async fn tenants_cannot_touch_each_other_messages() {
    let h = Harness::new();
    let partner_id = h.edifact_partner().await;

    let message = h
        .messages
        .create(
            &h.tenant,
            MessageDraft::inbound(partner_id, MessageType::Orders, SAMPLE_ORDERS),
        )
        .await
        .unwrap();

    let intruder = TenantId::from("globex");
    let err = h.processor.process(&intruder, message.id).await.unwrap_err();
    assert!(matches!(err, Error::MessageNotPending { .. }));

    // the real owner can still process it
    h.processor.process(&h.tenant, message.id).await.unwrap();
}
