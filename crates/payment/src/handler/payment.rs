use crate::{
    abstract_trait::{PaymentCommandServiceTrait, PaymentQueryServiceTrait},
    domain::{
        requests::payment::{CreatePaymentRequest, FindAllPayments},
        response::{api::ApiResponse, payment::PaymentResponse},
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
    path = "/api/payments",
    tag = "Payment",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created", body = ApiResponse<PaymentResponse>),
        (status = 200, description = "Idempotent replay of an existing payment", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Duplicate idempotency key")
    )
)]
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let result = state
        .di_container
        .payment_command
        .create_payment(&body)
        .await?;

    let (status, message) = if result.idempotent {
        (StatusCode::OK, "Payment already processed for this key")
    } else {
        (StatusCode::CREATED, "Payment created successfully")
    };

    Ok((
        status,
        Json(ApiResponse {
            status: "success".into(),
            message: message.into(),
            data: result.payment,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "Payment",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.di_container.payment_query.find_by_id(id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payment",
    params(FindAllPayments),
    responses(
        (status = 200, description = "List of payments", body = ApiResponse<Vec<PaymentResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_payments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FindAllPayments>,
) -> Result<impl IntoResponse, HttpError> {
    let response = state.di_container.payment_query.find_all(&params).await?;
    Ok(Json(response))
}
