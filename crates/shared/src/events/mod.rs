mod memory;

pub use self::memory::{MemoryEventBus, PublishedMessage};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Routing keys shared by both saga participants. Consumers bind to these
/// exact topics; `order.<status>` keys are derived through [`order_status`].
pub mod topics {
    pub const ORDER_CREATED: &str = "order.created";
    pub const ORDER_CANCELLED: &str = "order.cancelled";
    pub const PAYMENT_COMPLETED: &str = "payment.completed";
    pub const PAYMENT_FAILED: &str = "payment.failed";

    pub fn order_status(status: &str) -> String {
        format!("order.{}", status.to_lowercase())
    }
}

pub fn dead_letter_topic(topic: &str) -> String {
    format!("{topic}.dlq")
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub price: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedEvent {
    pub order_id: Uuid,
    pub user_id: i32,
    pub items: Vec<OrderItemPayload>,
    pub total: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancelledEvent {
    pub order_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusEvent {
    pub order_id: Uuid,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResultEvent {
    pub payment_id: Uuid,
    pub order_id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,

    pub amount: i64,
    pub status: String,
    pub processed_at: DateTime<Utc>,
}

/// Boundary decoding: a payload that does not match its routing key's schema
/// is a typed rejection, never a panic inside an aggregate.
pub fn decode_event<T: DeserializeOwned>(
    routing_key: &str,
    payload: &[u8],
) -> Result<T, ServiceError> {
    serde_json::from_slice(payload)
        .map_err(|e| ServiceError::MalformedEvent(format!("{routing_key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_topic_is_lowercased() {
        assert_eq!(topics::order_status("PAID"), "order.paid");
        assert_eq!(
            topics::order_status("PAYMENT_FAILED"),
            "order.payment_failed"
        );
    }

    #[test]
    fn events_use_camel_case_wire_shape() {
        let event = PaymentResultEvent {
            payment_id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            user_id: None,
            amount: 20,
            status: "COMPLETED".into(),
            processed_at: Utc::now(),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("paymentId").is_some());
        assert!(value.get("orderId").is_some());
        assert!(value.get("processedAt").is_some());
        assert!(value.get("userId").is_none());
    }

    #[test]
    fn decode_rejects_malformed_payload() {
        let result: Result<OrderCreatedEvent, _> =
            decode_event(topics::ORDER_CREATED, br#"{"total": 20}"#);

        assert!(matches!(result, Err(ServiceError::MalformedEvent(_))));
    }

    #[test]
    fn decode_roundtrips_order_created() {
        let event = OrderCreatedEvent {
            order_id: Uuid::new_v4(),
            user_id: 1,
            items: vec![OrderItemPayload {
                product_id: 7,
                name: None,
                price: 10,
                quantity: 2,
            }],
            total: 20,
            created_at: Utc::now(),
        };

        let payload = serde_json::to_vec(&event).unwrap();
        let decoded: OrderCreatedEvent = decode_event(topics::ORDER_CREATED, &payload).unwrap();
        assert_eq!(decoded.order_id, event.order_id);
        assert_eq!(decoded.total, 20);
    }
}
