use crate::{
    abstract_trait::PaymentQueryRepositoryTrait, domain::requests::payment::FindAllPayments,
    model::payment::Payment,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;
use uuid::Uuid;

pub struct PaymentQueryRepository {
    db: ConnectionPool,
}

impl PaymentQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentQueryRepositoryTrait for PaymentQueryRepository {
    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, RepositoryError> {
        let result = sqlx::query_as::<_, Payment>(
            r#"
        SELECT id, order_id, idempotency_key, amount, currency, status, method,
               created_at, updated_at
        FROM payments
        WHERE id = $1
        "#,
        )
        .bind(payment_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch payment {}: {:?}", payment_id, err);
            RepositoryError::from(err)
        })?;

        Ok(result)
    }

    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<Payment>, RepositoryError> {
        let result = sqlx::query_as::<_, Payment>(
            r#"
        SELECT id, order_id, idempotency_key, amount, currency, status, method,
               created_at, updated_at
        FROM payments
        WHERE idempotency_key = $1
        "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to look up idempotency key: {:?}", err);
            RepositoryError::from(err)
        })?;

        Ok(result)
    }

    async fn find_all(&self, req: &FindAllPayments) -> Result<Vec<Payment>, RepositoryError> {
        let limit = req.limit.unwrap_or(20).clamp(1, 100);
        let offset = req.offset.unwrap_or(0).max(0);

        let result = sqlx::query_as::<_, Payment>(
            r#"
        SELECT id, order_id, idempotency_key, amount, currency, status, method,
               created_at, updated_at
        FROM payments
        WHERE ($1::uuid IS NULL OR order_id = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
        )
        .bind(req.order_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to list payments: {:?}", err);
            RepositoryError::from(err)
        })?;

        Ok(result)
    }
}
