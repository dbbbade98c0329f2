use chrono::Utc;
use payment::{
    kafka::OrderEventHandler, repository::InMemoryPaymentRepository,
    service::PaymentCommandService,
};
use shared::{
    abstract_trait::EventHandler,
    errors::ServiceError,
    events::{MemoryEventBus, OrderCreatedEvent, OrderItemPayload, PaymentResultEvent, topics},
};
use std::sync::Arc;
use uuid::Uuid;

const CEILING: i64 = 10_000;

fn setup() -> (
    Arc<InMemoryPaymentRepository>,
    Arc<MemoryEventBus>,
    OrderEventHandler,
) {
    let repo = Arc::new(InMemoryPaymentRepository::new());
    let bus = Arc::new(MemoryEventBus::new());
    let service = PaymentCommandService::new(repo.clone(), repo.clone(), bus.clone(), CEILING);
    let handler = OrderEventHandler::new(Arc::new(service));
    (repo, bus, handler)
}

fn order_created_payload(order_id: Uuid, total: i64) -> Vec<u8> {
    serde_json::to_vec(&OrderCreatedEvent {
        order_id,
        user_id: 1,
        items: vec![OrderItemPayload {
            product_id: 1,
            name: Some("widget".into()),
            price: total,
            quantity: 1,
        }],
        total,
        created_at: Utc::now(),
    })
    .unwrap()
}

#[tokio::test]
async fn order_created_triggers_completed_payment() {
    let (repo, bus, handler) = setup();
    let order_id = Uuid::new_v4();

    handler
        .handle(topics::ORDER_CREATED, &order_created_payload(order_id, 20))
        .await
        .unwrap();

    assert_eq!(repo.payment_count().await, 1);

    let messages = bus.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].topic, topics::PAYMENT_COMPLETED);

    let event: PaymentResultEvent = serde_json::from_slice(&messages[0].payload).unwrap();
    assert_eq!(event.order_id, order_id);
    assert_eq!(event.status, "COMPLETED");
}

#[tokio::test]
async fn order_created_above_ceiling_fails_payment() {
    let (repo, bus, handler) = setup();

    handler
        .handle(
            topics::ORDER_CREATED,
            &order_created_payload(Uuid::new_v4(), 15_000),
        )
        .await
        .unwrap();

    assert_eq!(repo.payment_count().await, 1);
    assert_eq!(bus.count_for(topics::PAYMENT_FAILED).await, 1);
}

#[tokio::test]
async fn redelivered_order_created_is_processed_once() {
    let (repo, bus, handler) = setup();
    let payload = order_created_payload(Uuid::new_v4(), 20);

    handler.handle(topics::ORDER_CREATED, &payload).await.unwrap();
    handler.handle(topics::ORDER_CREATED, &payload).await.unwrap();

    assert_eq!(repo.payment_count().await, 1);
    assert_eq!(bus.messages().await.len(), 1);
}

#[tokio::test]
async fn malformed_order_event_is_a_typed_rejection() {
    let (repo, _bus, handler) = setup();

    let result = handler
        .handle(topics::ORDER_CREATED, br#"{"total": 20}"#)
        .await;

    assert!(matches!(result, Err(ServiceError::MalformedEvent(_))));
    assert_eq!(repo.payment_count().await, 0);
}
