use crate::domain::{
    requests::order::{CreateOrderRequest, FindAllOrders},
    response::{api::ApiResponse, order::OrderResponse},
};
use async_trait::async_trait;
use shared::{errors::ServiceError, events::PaymentResultEvent};
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait>;
pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait>;

#[async_trait]
pub trait OrderCommandServiceTrait: Send + Sync {
    async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;

    async fn cancel_order(&self, order_id: Uuid)
    -> Result<ApiResponse<OrderResponse>, ServiceError>;

    async fn handle_payment_event(
        &self,
        event: &PaymentResultEvent,
        routing_key: &str,
    ) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait OrderQueryServiceTrait: Send + Sync {
    async fn find_by_id(&self, order_id: Uuid)
    -> Result<ApiResponse<OrderResponse>, ServiceError>;

    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
}
