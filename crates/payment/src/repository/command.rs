use crate::{
    abstract_trait::PaymentCommandRepositoryTrait,
    domain::requests::payment::CreatePaymentRecordRequest, model::payment::Payment,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct PaymentCommandRepository {
    db: ConnectionPool,
}

impl PaymentCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentCommandRepositoryTrait for PaymentCommandRepository {
    async fn insert_unique(
        &self,
        req: &CreatePaymentRecordRequest,
    ) -> Result<Payment, RepositoryError> {
        let result = sqlx::query_as::<_, Payment>(
            r#"
        INSERT INTO payments (order_id, idempotency_key, amount, currency, status, method)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, order_id, idempotency_key, amount, currency, status, method,
                  created_at, updated_at
        "#,
        )
        .bind(req.order_id)
        .bind(&req.idempotency_key)
        .bind(req.amount)
        .bind(&req.currency)
        .bind(req.status.as_str())
        .bind(&req.method)
        .fetch_one(&self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::AlreadyExists(format!(
                    "Duplicate idempotency key: {}",
                    req.idempotency_key
                ))
            }
            err => {
                error!(
                    "❌ Failed to insert payment for order {}: {:?}",
                    req.order_id, err
                );
                RepositoryError::Sqlx(err)
            }
        })?;

        info!(
            "✅ Recorded payment {} for order {} with status {}",
            result.id, result.order_id, result.status
        );
        Ok(result)
    }
}
