use crate::model::order::Order as OrderModel;
use serde::{Deserialize, Serialize};
use shared::events::OrderItemPayload;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: i32,
    pub items: Vec<OrderItemPayload>,
    pub total: i64,
    pub status: String,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl From<OrderModel> for OrderResponse {
    fn from(value: OrderModel) -> Self {
        OrderResponse {
            id: value.id,
            user_id: value.user_id,
            items: value.items.0,
            total: value.total,
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: value.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}
