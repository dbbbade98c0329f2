use serde::{Deserialize, Serialize};
use shared::events::OrderItemPayload;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, IntoParams, Clone)]
pub struct FindAllOrders {
    #[serde(rename = "user_id")]
    pub user_id: Option<i32>,

    pub status: Option<String>,

    pub limit: Option<i64>,

    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "user_id")]
    pub user_id: i32,

    #[validate(length(min = 1), nested)]
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreateOrderItemRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "product_id")]
    pub product_id: i32,

    pub name: Option<String>,

    #[validate(range(min = 0))]
    pub price: i64,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl From<CreateOrderItemRequest> for OrderItemPayload {
    fn from(item: CreateOrderItemRequest) -> Self {
        OrderItemPayload {
            product_id: item.product_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderRecordRequest {
    pub id: Uuid,

    #[serde(rename = "user_id")]
    pub user_id: i32,

    pub items: Vec<OrderItemPayload>,

    pub total: i64,
}
