use crate::{
    domain::requests::payment::{CreatePaymentRecordRequest, FindAllPayments},
    model::payment::Payment,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynPaymentCommandRepository = Arc<dyn PaymentCommandRepositoryTrait>;
pub type DynPaymentQueryRepository = Arc<dyn PaymentQueryRepositoryTrait>;

#[async_trait]
pub trait PaymentCommandRepositoryTrait: Send + Sync {
    /// Single atomic insert keyed on the idempotency key. A concurrent
    /// duplicate fails with `RepositoryError::AlreadyExists` — the unique
    /// index is the only concurrency control this service needs.
    async fn insert_unique(
        &self,
        req: &CreatePaymentRecordRequest,
    ) -> Result<Payment, RepositoryError>;
}

#[async_trait]
pub trait PaymentQueryRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, RepositoryError>;

    async fn find_by_idempotency_key(&self, key: &str)
    -> Result<Option<Payment>, RepositoryError>;

    async fn find_all(&self, req: &FindAllPayments) -> Result<Vec<Payment>, RepositoryError>;
}
