use crate::{
    abstract_trait::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    domain::requests::order::{CreateOrderRecordRequest, FindAllOrders},
    model::order::{Order, OrderStatus},
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use sqlx::types::Json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory twin of the Postgres repositories for tests. The single write
/// lock stands in for the database's row-level atomicity: a conditional
/// status update observes and mutates the row in one critical section.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    rows: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn order_count(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn get(&self, order_id: Uuid) -> Option<Order> {
        self.rows.read().await.get(&order_id).cloned()
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryOrderRepository {
    async fn create_order(&self, req: &CreateOrderRecordRequest) -> Result<Order, RepositoryError> {
        let mut rows = self.rows.write().await;

        if rows.contains_key(&req.id) {
            return Err(RepositoryError::AlreadyExists(format!(
                "order {} already exists",
                req.id
            )));
        }

        let now = Utc::now();
        let order = Order {
            id: req.id,
            user_id: req.user_id,
            items: Json(req.items.clone()),
            total: req.total,
            status: OrderStatus::Pending.as_str().to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        rows.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update_status_if_pending(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut rows = self.rows.write().await;

        match rows.get_mut(&order_id) {
            Some(order) if order.status == OrderStatus::Pending.as_str() => {
                order.status = new_status.as_str().to_string();
                order.updated_at = Some(Utc::now());
                Ok(Some(order.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryOrderRepository {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, RepositoryError> {
        Ok(self.rows.read().await.get(&order_id).cloned())
    }

    async fn find_all(&self, req: &FindAllOrders) -> Result<Vec<Order>, RepositoryError> {
        let limit = req.limit.unwrap_or(20).clamp(1, 100) as usize;
        let offset = req.offset.unwrap_or(0).max(0) as usize;
        let status = req.status.as_ref().map(|s| s.to_uppercase());

        let mut orders: Vec<Order> = self
            .rows
            .read()
            .await
            .values()
            .filter(|o| req.user_id.is_none_or(|user_id| o.user_id == user_id))
            .filter(|o| status.as_ref().is_none_or(|s| &o.status == s))
            .cloned()
            .collect();

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders.into_iter().skip(offset).take(limit).collect())
    }
}
