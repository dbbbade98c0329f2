use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    domain::requests::order::CreateOrderRecordRequest,
    model::order::{Order, OrderStatus},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::types::Json;
use tracing::{error, info};
use uuid::Uuid;

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, req: &CreateOrderRecordRequest) -> Result<Order, RepositoryError> {
        let result = sqlx::query_as::<_, Order>(
            r#"
        INSERT INTO orders (id, user_id, items, total, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
        RETURNING id, user_id, items, total, status, created_at, updated_at
        "#,
        )
        .bind(req.id)
        .bind(req.user_id)
        .bind(Json(&req.items))
        .bind(req.total)
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for user {}: {:?}",
                req.user_id, err
            );
            RepositoryError::from(err)
        })?;

        info!("✅ Created order {} for user {}", result.id, result.user_id);
        Ok(result)
    }

    async fn update_status_if_pending(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let result = sqlx::query_as::<_, Order>(
            r#"
        UPDATE orders
        SET status     = $2,
            updated_at = current_timestamp
        WHERE id = $1 AND status = $3
        RETURNING id, user_id, items, total, status, created_at, updated_at
        "#,
        )
        .bind(order_id)
        .bind(new_status.as_str())
        .bind(OrderStatus::Pending.as_str())
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to transition order {} to {}: {:?}",
                order_id, new_status, err
            );
            RepositoryError::from(err)
        })?;

        Ok(result)
    }
}
