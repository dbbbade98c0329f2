use crate::{
    domain::requests::order::{CreateOrderRecordRequest, FindAllOrders},
    model::order::{Order, OrderStatus},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait>;
pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait>;

#[async_trait]
pub trait OrderCommandRepositoryTrait: Send + Sync {
    async fn create_order(&self, req: &CreateOrderRecordRequest) -> Result<Order, RepositoryError>;

    /// Compare-and-set status transition: only a PENDING order is updated.
    /// `None` means zero rows matched — the order is absent or already
    /// terminal.
    async fn update_status_if_pending(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError>;
}

#[async_trait]
pub trait OrderQueryRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, RepositoryError>;

    async fn find_all(&self, req: &FindAllOrders) -> Result<Vec<Order>, RepositoryError>;
}
