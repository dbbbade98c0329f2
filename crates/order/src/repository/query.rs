use crate::{
    abstract_trait::OrderQueryRepositoryTrait, domain::requests::order::FindAllOrders,
    model::order::Order,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;
use uuid::Uuid;

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, RepositoryError> {
        let result = sqlx::query_as::<_, Order>(
            r#"
        SELECT id, user_id, items, total, status, created_at, updated_at
        FROM orders
        WHERE id = $1
        "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch order {}: {:?}", order_id, err);
            RepositoryError::from(err)
        })?;

        Ok(result)
    }

    async fn find_all(&self, req: &FindAllOrders) -> Result<Vec<Order>, RepositoryError> {
        let limit = req.limit.unwrap_or(20).clamp(1, 100);
        let offset = req.offset.unwrap_or(0).max(0);
        let status = req.status.as_ref().map(|s| s.to_uppercase());

        let result = sqlx::query_as::<_, Order>(
            r#"
        SELECT id, user_id, items, total, status, created_at, updated_at
        FROM orders
        WHERE ($1::int4 IS NULL OR user_id = $1)
          AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
        )
        .bind(req.user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to list orders: {:?}", err);
            RepositoryError::from(err)
        })?;

        Ok(result)
    }
}
