use crate::model::payment::PaymentStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, IntoParams, Clone)]
pub struct FindAllPayments {
    #[serde(rename = "order_id")]
    pub order_id: Option<Uuid>,

    pub limit: Option<i64>,

    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct CreatePaymentRequest {
    #[serde(rename = "order_id")]
    pub order_id: Uuid,

    #[validate(range(min = 0))]
    pub amount: i64,

    pub currency: Option<String>,

    pub method: Option<String>,

    #[validate(length(min = 1))]
    #[serde(rename = "idempotency_key")]
    pub idempotency_key: String,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentRecordRequest {
    pub order_id: Uuid,
    pub idempotency_key: String,
    pub amount: i64,
    pub currency: String,
    pub method: String,
    pub status: PaymentStatus,
}
