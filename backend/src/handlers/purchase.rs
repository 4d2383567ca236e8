//! HTTP handlers for purchase lot endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::purchase::{
    CreatePurchaseInput, Purchase, PurchaseFilter, PurchaseService, UpdatePurchaseInput,
};
use crate::AppState;

/// Record a purchase lot
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseInput>,
) -> AppResult<Json<Purchase>> {
    let service = PurchaseService::new(state.db);
    let purchase = service.create(input).await?;
    Ok(Json(purchase))
}

/// Get a purchase
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Purchase>> {
    let service = PurchaseService::new(state.db);
    let purchase = service.get(id).await?;
    Ok(Json(purchase))
}

/// List purchases with optional supplier / product type / date filters
pub async fn list_purchases(
    State(state): State<AppState>,
    Query(filter): Query<PurchaseFilter>,
) -> AppResult<Json<Vec<Purchase>>> {
    let service = PurchaseService::new(state.db);
    let purchases = service.list(filter).await?;
    Ok(Json(purchases))
}

/// Update a purchase
pub async fn update_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePurchaseInput>,
) -> AppResult<Json<Purchase>> {
    let service = PurchaseService::new(state.db);
    let purchase = service.update(id, input).await?;
    Ok(Json(purchase))
}

/// Delete a purchase (blocked while sales, payments or losses exist)
pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = PurchaseService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
