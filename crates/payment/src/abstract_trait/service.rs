use crate::domain::{
    requests::payment::{CreatePaymentRequest, FindAllPayments},
    response::{
        api::ApiResponse,
        payment::{CreatePaymentResult, PaymentResponse},
    },
};
use async_trait::async_trait;
use shared::{errors::ServiceError, events::OrderCreatedEvent};
use std::sync::Arc;
use uuid::Uuid;

pub type DynPaymentCommandService = Arc<dyn PaymentCommandServiceTrait>;
pub type DynPaymentQueryService = Arc<dyn PaymentQueryServiceTrait>;

#[async_trait]
pub trait PaymentCommandServiceTrait: Send + Sync {
    async fn process_order_event(&self, event: &OrderCreatedEvent) -> Result<(), ServiceError>;

    async fn create_payment(
        &self,
        req: &CreatePaymentRequest,
    ) -> Result<CreatePaymentResult, ServiceError>;
}

#[async_trait]
pub trait PaymentQueryServiceTrait: Send + Sync {
    async fn find_by_id(
        &self,
        payment_id: Uuid,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError>;

    async fn find_all(
        &self,
        req: &FindAllPayments,
    ) -> Result<ApiResponse<Vec<PaymentResponse>>, ServiceError>;
}
