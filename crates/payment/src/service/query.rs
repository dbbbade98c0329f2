use crate::{
    abstract_trait::{DynPaymentQueryRepository, PaymentQueryServiceTrait},
    domain::{
        requests::payment::FindAllPayments,
        response::{api::ApiResponse, payment::PaymentResponse},
    },
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentQueryService {
    query: DynPaymentQueryRepository,
}

impl PaymentQueryService {
    pub fn new(query: DynPaymentQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl PaymentQueryServiceTrait for PaymentQueryService {
    async fn find_by_id(
        &self,
        payment_id: Uuid,
    ) -> Result<ApiResponse<PaymentResponse>, ServiceError> {
        let payment = self
            .query
            .find_by_id(payment_id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Ok(ApiResponse {
            status: "success".into(),
            message: "Payment fetched successfully".into(),
            data: PaymentResponse::from(payment),
        })
    }

    async fn find_all(
        &self,
        req: &FindAllPayments,
    ) -> Result<ApiResponse<Vec<PaymentResponse>>, ServiceError> {
        info!("🔍 Listing payments: order_id={:?}", req.order_id);

        let payments = self
            .query
            .find_all(req)
            .await
            .map_err(ServiceError::Repo)?;

        Ok(ApiResponse {
            status: "success".into(),
            message: "Payments fetched successfully".into(),
            data: payments.into_iter().map(PaymentResponse::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::PaymentCommandRepositoryTrait;
    use crate::domain::requests::payment::CreatePaymentRecordRequest;
    use crate::model::payment::PaymentStatus;
    use crate::repository::InMemoryPaymentRepository;
    use std::sync::Arc;

    async fn seed(repo: &InMemoryPaymentRepository, order_id: Uuid, key: &str) -> Uuid {
        repo.insert_unique(&CreatePaymentRecordRequest {
            order_id,
            idempotency_key: key.into(),
            amount: 20,
            currency: "USD".into(),
            method: "credit_card".into(),
            status: PaymentStatus::Completed,
        })
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn find_by_id_returns_not_found_for_missing_payment() {
        let repo = Arc::new(InMemoryPaymentRepository::new());
        let service = PaymentQueryService::new(repo);

        let result = service.find_by_id(Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repo(RepositoryError::NotFound))
        ));
    }

    #[tokio::test]
    async fn find_all_filters_by_order() {
        let repo = Arc::new(InMemoryPaymentRepository::new());
        let order_id = Uuid::new_v4();
        seed(&repo, order_id, "key-1").await;
        seed(&repo, Uuid::new_v4(), "key-2").await;

        let service = PaymentQueryService::new(repo);
        let response = service
            .find_all(&FindAllPayments {
                order_id: Some(order_id),
                limit: None,
                offset: None,
            })
            .await
            .unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].order_id, order_id);
    }
}
