use crate::{
    abstract_trait::{PaymentCommandRepositoryTrait, PaymentQueryRepositoryTrait},
    domain::requests::payment::{CreatePaymentRecordRequest, FindAllPayments},
    model::payment::Payment,
};
use async_trait::async_trait;
use chrono::Utc;
use shared::errors::RepositoryError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory twin of the Postgres repositories for tests. The map is keyed
/// by idempotency key and guarded by one write lock, giving the same
/// check-then-insert atomicity the unique index provides in Postgres.
#[derive(Clone, Default)]
pub struct InMemoryPaymentRepository {
    rows: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn payment_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl PaymentCommandRepositoryTrait for InMemoryPaymentRepository {
    async fn insert_unique(
        &self,
        req: &CreatePaymentRecordRequest,
    ) -> Result<Payment, RepositoryError> {
        let mut rows = self.rows.write().await;

        if rows.contains_key(&req.idempotency_key) {
            return Err(RepositoryError::AlreadyExists(format!(
                "Duplicate idempotency key: {}",
                req.idempotency_key
            )));
        }

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4(),
            order_id: req.order_id,
            idempotency_key: req.idempotency_key.clone(),
            amount: req.amount,
            currency: req.currency.clone(),
            status: req.status.as_str().to_string(),
            method: req.method.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };

        rows.insert(payment.idempotency_key.clone(), payment.clone());
        Ok(payment)
    }
}

#[async_trait]
impl PaymentQueryRepositoryTrait for InMemoryPaymentRepository {
    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, RepositoryError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|p| p.id == payment_id)
            .cloned())
    }

    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<Payment>, RepositoryError> {
        Ok(self.rows.read().await.get(key).cloned())
    }

    async fn find_all(&self, req: &FindAllPayments) -> Result<Vec<Payment>, RepositoryError> {
        let limit = req.limit.unwrap_or(20).clamp(1, 100) as usize;
        let offset = req.offset.unwrap_or(0).max(0) as usize;

        let mut payments: Vec<Payment> = self
            .rows
            .read()
            .await
            .values()
            .filter(|p| req.order_id.is_none_or(|order_id| p.order_id == order_id))
            .cloned()
            .collect();

        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(payments.into_iter().skip(offset).take(limit).collect())
    }
}
