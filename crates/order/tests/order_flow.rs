use chrono::Utc;
use order::{
    abstract_trait::OrderCommandServiceTrait,
    domain::requests::order::{CreateOrderItemRequest, CreateOrderRequest},
    kafka::PaymentEventHandler,
    repository::InMemoryOrderRepository,
    service::OrderCommandService,
};
use shared::{
    abstract_trait::EventHandler,
    errors::ServiceError,
    events::{MemoryEventBus, PaymentResultEvent, topics},
};
use std::sync::Arc;
use uuid::Uuid;

fn setup() -> (
    Arc<InMemoryOrderRepository>,
    Arc<MemoryEventBus>,
    PaymentEventHandler,
    OrderCommandService,
) {
    let repo = Arc::new(InMemoryOrderRepository::new());
    let bus = Arc::new(MemoryEventBus::new());
    let service = OrderCommandService::new(repo.clone(), bus.clone());
    let handler = PaymentEventHandler::new(Arc::new(service.clone()));
    (repo, bus, handler, service)
}

fn result_payload(order_id: Uuid, status: &str) -> Vec<u8> {
    serde_json::to_vec(&PaymentResultEvent {
        payment_id: Uuid::new_v4(),
        order_id,
        user_id: Some(1),
        amount: 20,
        status: status.to_string(),
        processed_at: Utc::now(),
    })
    .unwrap()
}

#[tokio::test]
async fn payment_completed_event_closes_the_saga() {
    let (repo, bus, handler, service) = setup();

    let created = service
        .create_order(&CreateOrderRequest {
            user_id: 1,
            items: vec![CreateOrderItemRequest {
                product_id: 1,
                name: Some("widget".into()),
                price: 10,
                quantity: 2,
            }],
        })
        .await
        .unwrap();

    assert_eq!(created.data.total, 20);
    assert_eq!(bus.count_for(topics::ORDER_CREATED).await, 1);
    bus.clear().await;

    handler
        .handle(
            topics::PAYMENT_COMPLETED,
            &result_payload(created.data.id, "COMPLETED"),
        )
        .await
        .unwrap();

    assert_eq!(repo.get(created.data.id).await.unwrap().status, "PAID");
    assert_eq!(bus.count_for("order.paid").await, 1);
}

#[tokio::test]
async fn redelivered_payment_event_is_accepted_as_noop() {
    let (repo, bus, handler, service) = setup();

    let created = service
        .create_order(&CreateOrderRequest {
            user_id: 1,
            items: vec![CreateOrderItemRequest {
                product_id: 1,
                name: None,
                price: 10,
                quantity: 2,
            }],
        })
        .await
        .unwrap();
    bus.clear().await;

    let payload = result_payload(created.data.id, "COMPLETED");
    handler
        .handle(topics::PAYMENT_COMPLETED, &payload)
        .await
        .unwrap();
    handler
        .handle(topics::PAYMENT_COMPLETED, &payload)
        .await
        .unwrap();

    assert_eq!(repo.get(created.data.id).await.unwrap().status, "PAID");
    assert_eq!(bus.count_for("order.paid").await, 1);
}

#[tokio::test]
async fn malformed_payment_event_is_a_typed_rejection() {
    let (_repo, _bus, handler, _service) = setup();

    let result = handler
        .handle(topics::PAYMENT_COMPLETED, br#"{"amount": 20}"#)
        .await;

    assert!(matches!(result, Err(ServiceError::MalformedEvent(_))));
}
