use crate::{
    abstract_trait::{OrderCommandServiceTrait, OrderQueryServiceTrait},
    domain::{
        requests::order::{CreateOrderRequest, FindAllOrders},
        response::{api::ApiResponse, order::OrderResponse},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use shared::errors::HttpError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.di_container.order_command.create_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.di_container.order_query.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    params(FindAllOrders),
    responses(
        (status = 200, description = "List of orders", body = ApiResponse<Vec<OrderResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.di_container.order_query.find_all(&params).await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/cancel",
    tag = "Order",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderResponse>),
        (status = 409, description = "Order not found or no longer PENDING")
    )
)]
pub async fn cancel_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.di_container.order_command.cancel_order(id).await?;
    Ok(Json(response))
}
