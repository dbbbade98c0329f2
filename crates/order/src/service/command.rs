use crate::{
    abstract_trait::{DynOrderCommandRepository, OrderCommandServiceTrait},
    domain::{
        requests::order::{CreateOrderRecordRequest, CreateOrderRequest},
        response::{api::ApiResponse, order::OrderResponse},
    },
    model::order::OrderStatus,
    service::validation_errors,
};
use async_trait::async_trait;
use chrono::Utc;
use shared::{
    abstract_trait::DynEventBus,
    errors::{RepositoryError, ServiceError},
    events::{
        OrderCancelledEvent, OrderCreatedEvent, OrderItemPayload, OrderStatusEvent,
        PaymentResultEvent, topics,
    },
};
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    bus: DynEventBus,
}

impl OrderCommandService {
    pub fn new(command: DynOrderCommandRepository, bus: DynEventBus) -> Self {
        Self { command, bus }
    }

    // The order row is durable regardless of broker health; a publish failure
    // here is logged as a dropped event, never bubbled to the caller.
    async fn publish_best_effort<T: serde::Serialize>(&self, topic: &str, key: &str, event: &T) {
        let payload = match serde_json::to_vec(event) {
            Ok(payload) => payload,
            Err(e) => {
                error!("❌ Failed to serialize {topic} event: {e} — event dropped");
                return;
            }
        };

        if let Err(e) = self.bus.publish(topic, key, &payload).await {
            error!("❌ Failed to publish {topic} for {key}: {e:?} — event dropped");
        } else {
            info!("📤 Published event: {topic} | key={key}");
        }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🏗️ Creating new order for user_id={}", req.user_id);

        req.validate().map_err(validation_errors)?;

        if req.items.is_empty() {
            return Err(ServiceError::Validation(vec![
                "items must not be empty".into(),
            ]));
        }

        let items: Vec<OrderItemPayload> = req.items.iter().cloned().map(Into::into).collect();
        let total: i64 = items
            .iter()
            .map(|item| item.price * i64::from(item.quantity))
            .sum();

        let record = CreateOrderRecordRequest {
            id: Uuid::new_v4(),
            user_id: req.user_id,
            items,
            total,
        };

        let order = self
            .command
            .create_order(&record)
            .await
            .map_err(ServiceError::Repo)?;

        let event = OrderCreatedEvent {
            order_id: order.id,
            user_id: order.user_id,
            items: order.items.0.clone(),
            total: order.total,
            created_at: order.created_at.unwrap_or_else(Utc::now),
        };
        self.publish_best_effort(topics::ORDER_CREATED, &order.id.to_string(), &event)
            .await;

        info!(
            "✅ order_created: order_id={} user_id={} total={}",
            order.id, order.user_id, order.total
        );

        Ok(ApiResponse {
            status: "success".into(),
            message: "Order created successfully".into(),
            data: OrderResponse::from(order),
        })
    }

    async fn cancel_order(
        &self,
        order_id: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("✏️ Cancelling order {order_id}");

        let cancelled = self
            .command
            .update_status_if_pending(order_id, OrderStatus::Cancelled)
            .await
            .map_err(ServiceError::Repo)?;

        let Some(order) = cancelled else {
            return Err(ServiceError::Repo(RepositoryError::Conflict(
                "Order cannot be cancelled (not found or not in PENDING status)".into(),
            )));
        };

        self.publish_best_effort(
            topics::ORDER_CANCELLED,
            &order.id.to_string(),
            &OrderCancelledEvent { order_id: order.id },
        )
        .await;

        info!("✅ order_cancelled: order_id={order_id}");

        Ok(ApiResponse {
            status: "success".into(),
            message: "Order cancelled successfully".into(),
            data: OrderResponse::from(order),
        })
    }

    async fn handle_payment_event(
        &self,
        event: &PaymentResultEvent,
        routing_key: &str,
    ) -> Result<(), ServiceError> {
        let new_status = match routing_key {
            topics::PAYMENT_COMPLETED => OrderStatus::Paid,
            topics::PAYMENT_FAILED => OrderStatus::PaymentFailed,
            other => {
                return Err(ServiceError::MalformedEvent(format!(
                    "unexpected payment routing key: {other}"
                )));
            }
        };

        // First terminal transition wins: the update is conditional on
        // PENDING, so a late or contradictory redelivery cannot overwrite a
        // resolved order.
        let updated = self
            .command
            .update_status_if_pending(event.order_id, new_status)
            .await
            .map_err(ServiceError::Repo)?;

        let Some(order) = updated else {
            info!(
                "🔁 Payment event for order {} ignored — already resolved",
                event.order_id
            );
            return Ok(());
        };

        info!(
            "✅ order_status_updated: order_id={} status={}",
            order.id, new_status
        );

        let status_event = OrderStatusEvent {
            order_id: order.id,
            status: new_status.as_str().to_string(),
            updated_at: order.updated_at.unwrap_or_else(Utc::now),
        };
        let payload = serde_json::to_vec(&status_event)
            .map_err(|e| ServiceError::Internal(format!("Failed to serialize event: {e}")))?;

        // Propagated so the consumer nacks and the bus redelivers; the retry
        // then lands on the already-resolved branch above.
        self.bus
            .publish(
                &topics::order_status(new_status.as_str()),
                &order.id.to_string(),
                &payload,
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::order::CreateOrderItemRequest;
    use crate::repository::InMemoryOrderRepository;
    use shared::events::MemoryEventBus;
    use std::sync::Arc;

    fn service() -> (
        OrderCommandService,
        Arc<InMemoryOrderRepository>,
        Arc<MemoryEventBus>,
    ) {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let bus = Arc::new(MemoryEventBus::new());
        let service = OrderCommandService::new(repo.clone(), bus.clone());
        (service, repo, bus)
    }

    fn create_request(user_id: i32, items: Vec<(i64, i32)>) -> CreateOrderRequest {
        CreateOrderRequest {
            user_id,
            items: items
                .into_iter()
                .map(|(price, quantity)| CreateOrderItemRequest {
                    product_id: 1,
                    name: None,
                    price,
                    quantity,
                })
                .collect(),
        }
    }

    fn payment_event(order_id: Uuid, status: &str, amount: i64) -> PaymentResultEvent {
        PaymentResultEvent {
            payment_id: Uuid::new_v4(),
            order_id,
            user_id: Some(1),
            amount,
            status: status.to_string(),
            processed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_computes_total_and_publishes_event() {
        let (service, _repo, bus) = service();

        let response = service
            .create_order(&create_request(1, vec![(10, 2)]))
            .await
            .unwrap();

        assert_eq!(response.data.total, 20);
        assert_eq!(response.data.status, "PENDING");

        let messages = bus.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].topic, topics::ORDER_CREATED);

        let event: OrderCreatedEvent = serde_json::from_slice(&messages[0].payload).unwrap();
        assert_eq!(event.total, 20);
        assert_eq!(event.user_id, 1);
    }

    #[tokio::test]
    async fn create_sums_over_multiple_items() {
        let (service, _repo, _bus) = service();

        let response = service
            .create_order(&create_request(1, vec![(10, 2), (5, 3), (100, 1)]))
            .await
            .unwrap();

        assert_eq!(response.data.total, 135);
    }

    #[tokio::test]
    async fn create_rejects_empty_items() {
        let (service, repo, bus) = service();

        let result = service.create_order(&create_request(1, vec![])).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(repo.order_count().await, 0);
        assert_eq!(bus.messages().await.len(), 0);
    }

    #[tokio::test]
    async fn create_rejects_missing_user() {
        let (service, _repo, _bus) = service();

        let result = service.create_order(&create_request(0, vec![(10, 1)])).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn create_tolerates_publish_failure() {
        let (service, repo, bus) = service();
        bus.set_fail_publish(true);

        let response = service
            .create_order(&create_request(1, vec![(10, 2)]))
            .await
            .unwrap();

        assert_eq!(response.data.status, "PENDING");
        assert_eq!(repo.order_count().await, 1);
        assert_eq!(bus.messages().await.len(), 0);
    }

    #[tokio::test]
    async fn cancel_pending_order_publishes_event() {
        let (service, repo, bus) = service();

        let created = service
            .create_order(&create_request(1, vec![(10, 1)]))
            .await
            .unwrap();
        bus.clear().await;

        let cancelled = service.cancel_order(created.data.id).await.unwrap();

        assert_eq!(cancelled.data.status, "CANCELLED");
        assert_eq!(bus.count_for(topics::ORDER_CANCELLED).await, 1);
        assert_eq!(
            repo.get(created.data.id).await.unwrap().status,
            "CANCELLED"
        );
    }

    #[tokio::test]
    async fn cancel_missing_order_is_conflict() {
        let (service, _repo, _bus) = service();

        let result = service.cancel_order(Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repo(RepositoryError::Conflict(_)))
        ));
    }

    #[tokio::test]
    async fn cancel_resolved_order_is_conflict_and_leaves_status() {
        let (service, repo, bus) = service();

        let created = service
            .create_order(&create_request(1, vec![(10, 2)]))
            .await
            .unwrap();
        service
            .handle_payment_event(
                &payment_event(created.data.id, "COMPLETED", 20),
                topics::PAYMENT_COMPLETED,
            )
            .await
            .unwrap();
        bus.clear().await;

        let result = service.cancel_order(created.data.id).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repo(RepositoryError::Conflict(_)))
        ));
        assert_eq!(repo.get(created.data.id).await.unwrap().status, "PAID");
        assert_eq!(bus.messages().await.len(), 0);
    }

    #[tokio::test]
    async fn payment_completed_marks_order_paid() {
        let (service, repo, bus) = service();

        let created = service
            .create_order(&create_request(1, vec![(10, 2)]))
            .await
            .unwrap();
        bus.clear().await;

        service
            .handle_payment_event(
                &payment_event(created.data.id, "COMPLETED", 20),
                topics::PAYMENT_COMPLETED,
            )
            .await
            .unwrap();

        assert_eq!(repo.get(created.data.id).await.unwrap().status, "PAID");
        assert_eq!(bus.count_for("order.paid").await, 1);
    }

    #[tokio::test]
    async fn payment_failed_marks_order_payment_failed() {
        let (service, repo, bus) = service();

        let created = service
            .create_order(&create_request(1, vec![(7500, 2)]))
            .await
            .unwrap();
        bus.clear().await;

        service
            .handle_payment_event(
                &payment_event(created.data.id, "FAILED", 15000),
                topics::PAYMENT_FAILED,
            )
            .await
            .unwrap();

        assert_eq!(
            repo.get(created.data.id).await.unwrap().status,
            "PAYMENT_FAILED"
        );
        assert_eq!(bus.count_for("order.payment_failed").await, 1);
    }

    #[tokio::test]
    async fn first_terminal_transition_wins() {
        let (service, repo, bus) = service();

        let created = service
            .create_order(&create_request(1, vec![(10, 2)]))
            .await
            .unwrap();
        service
            .handle_payment_event(
                &payment_event(created.data.id, "COMPLETED", 20),
                topics::PAYMENT_COMPLETED,
            )
            .await
            .unwrap();
        bus.clear().await;

        // Contradictory redelivery after the order is already PAID.
        service
            .handle_payment_event(
                &payment_event(created.data.id, "FAILED", 20),
                topics::PAYMENT_FAILED,
            )
            .await
            .unwrap();

        assert_eq!(repo.get(created.data.id).await.unwrap().status, "PAID");
        assert_eq!(bus.messages().await.len(), 0);
    }

    #[tokio::test]
    async fn payment_event_for_unknown_order_is_noop() {
        let (service, _repo, bus) = service();

        service
            .handle_payment_event(
                &payment_event(Uuid::new_v4(), "COMPLETED", 20),
                topics::PAYMENT_COMPLETED,
            )
            .await
            .unwrap();

        assert_eq!(bus.messages().await.len(), 0);
    }

    #[tokio::test]
    async fn unexpected_routing_key_is_malformed() {
        let (service, _repo, _bus) = service();

        let result = service
            .handle_payment_event(&payment_event(Uuid::new_v4(), "COMPLETED", 20), "payment.refunded")
            .await;

        assert!(matches!(result, Err(ServiceError::MalformedEvent(_))));
    }

    #[tokio::test]
    async fn status_publish_failure_propagates_for_redelivery() {
        let (service, repo, bus) = service();

        let created = service
            .create_order(&create_request(1, vec![(10, 2)]))
            .await
            .unwrap();
        bus.set_fail_publish(true);

        let result = service
            .handle_payment_event(
                &payment_event(created.data.id, "COMPLETED", 20),
                topics::PAYMENT_COMPLETED,
            )
            .await;

        assert!(matches!(result, Err(ServiceError::Kafka(_))));
        // Transition already committed; the redelivery lands on the
        // already-resolved branch.
        assert_eq!(repo.get(created.data.id).await.unwrap().status, "PAID");

        bus.set_fail_publish(false);
        service
            .handle_payment_event(
                &payment_event(created.data.id, "COMPLETED", 20),
                topics::PAYMENT_COMPLETED,
            )
            .await
            .unwrap();
        assert_eq!(bus.messages().await.len(), 0);
    }
}
