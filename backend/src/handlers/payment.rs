//! HTTP handlers for payment endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::payment::{
    CreatePaymentInput, Payment, PaymentFilter, PaymentService, UpdatePaymentInput,
};
use crate::AppState;

/// Record a payment
pub async fn create_payment(
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentInput>,
) -> AppResult<Json<Payment>> {
    let service = PaymentService::new(state.db);
    let payment = service.create(input).await?;
    Ok(Json(payment))
}

/// Get a payment
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Payment>> {
    let service = PaymentService::new(state.db);
    let payment = service.get(id).await?;
    Ok(Json(payment))
}

/// List payments with optional type / target / date filters
pub async fn list_payments(
    State(state): State<AppState>,
    Query(filter): Query<PaymentFilter>,
) -> AppResult<Json<Vec<Payment>>> {
    let service = PaymentService::new(state.db);
    let payments = service.list(filter).await?;
    Ok(Json(payments))
}

/// Update a payment
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePaymentInput>,
) -> AppResult<Json<Payment>> {
    let service = PaymentService::new(state.db);
    let payment = service.update(id, input).await?;
    Ok(Json(payment))
}

/// Delete a payment
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = PaymentService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
