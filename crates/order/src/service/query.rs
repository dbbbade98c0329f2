use crate::{
    abstract_trait::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::{
        requests::order::FindAllOrders,
        response::{api::ApiResponse, order::OrderResponse},
    },
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_by_id(
        &self,
        order_id: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await
            .map_err(ServiceError::Repo)?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Ok(ApiResponse {
            status: "success".into(),
            message: "Order fetched successfully".into(),
            data: OrderResponse::from(order),
        })
    }

    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!(
            "🔍 Listing orders: user_id={:?} status={:?}",
            req.user_id, req.status
        );

        let orders = self
            .query
            .find_all(req)
            .await
            .map_err(ServiceError::Repo)?;

        Ok(ApiResponse {
            status: "success".into(),
            message: "Orders fetched successfully".into(),
            data: orders.into_iter().map(OrderResponse::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::OrderCommandRepositoryTrait;
    use crate::domain::requests::order::CreateOrderRecordRequest;
    use crate::repository::InMemoryOrderRepository;
    use shared::events::OrderItemPayload;
    use std::sync::Arc;

    async fn seed(repo: &InMemoryOrderRepository, user_id: i32, total: i64) -> Uuid {
        let record = CreateOrderRecordRequest {
            id: Uuid::new_v4(),
            user_id,
            items: vec![OrderItemPayload {
                product_id: 1,
                name: None,
                price: total,
                quantity: 1,
            }],
            total,
        };
        repo.create_order(&record).await.unwrap().id
    }

    #[tokio::test]
    async fn find_by_id_returns_not_found_for_missing_order() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let service = OrderQueryService::new(repo);

        let result = service.find_by_id(Uuid::new_v4()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repo(RepositoryError::NotFound))
        ));
    }

    #[tokio::test]
    async fn find_all_filters_by_user() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        seed(&repo, 1, 10).await;
        seed(&repo, 1, 20).await;
        seed(&repo, 2, 30).await;

        let service = OrderQueryService::new(repo);
        let response = service
            .find_all(&FindAllOrders {
                user_id: Some(1),
                status: None,
                limit: None,
                offset: None,
            })
            .await
            .unwrap();

        assert_eq!(response.data.len(), 2);
        assert!(response.data.iter().all(|o| o.user_id == 1));
    }

    #[tokio::test]
    async fn find_all_uppercases_status_filter() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        seed(&repo, 1, 10).await;

        let service = OrderQueryService::new(repo);
        let response = service
            .find_all(&FindAllOrders {
                user_id: None,
                status: Some("pending".into()),
                limit: None,
                offset: None,
            })
            .await
            .unwrap();

        assert_eq!(response.data.len(), 1);
    }
}
