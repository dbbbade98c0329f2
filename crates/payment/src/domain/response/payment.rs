use crate::model::payment::Payment as PaymentModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PaymentResponse {
    pub id: Uuid,
    #[serde(rename = "order_id")]
    pub order_id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub method: String,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl From<PaymentModel> for PaymentResponse {
    fn from(value: PaymentModel) -> Self {
        PaymentResponse {
            id: value.id,
            order_id: value.order_id,
            amount: value.amount,
            currency: value.currency,
            status: value.status,
            method: value.method,
            created_at: value.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: value.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Outcome of a client-invoked payment: `idempotent` marks a replay that
/// returned the previously persisted record instead of creating a new one.
#[derive(Debug, Clone)]
pub struct CreatePaymentResult {
    pub payment: PaymentResponse,
    pub idempotent: bool,
}
