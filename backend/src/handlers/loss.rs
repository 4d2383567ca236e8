//! HTTP handlers for inventory loss endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::loss::{
    CreateLossInput, InventoryLoss, LossFilter, LossService, UpdateLossInput,
};
use crate::AppState;

/// Record an inventory loss
pub async fn create_loss(
    State(state): State<AppState>,
    Json(input): Json<CreateLossInput>,
) -> AppResult<Json<InventoryLoss>> {
    let service = LossService::new(state.db);
    let loss = service.create(input).await?;
    Ok(Json(loss))
}

/// Get an inventory loss
pub async fn get_loss(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<InventoryLoss>> {
    let service = LossService::new(state.db);
    let loss = service.get(id).await?;
    Ok(Json(loss))
}

/// List inventory losses with optional purchase / date filters
pub async fn list_losses(
    State(state): State<AppState>,
    Query(filter): Query<LossFilter>,
) -> AppResult<Json<Vec<InventoryLoss>>> {
    let service = LossService::new(state.db);
    let losses = service.list(filter).await?;
    Ok(Json(losses))
}

/// Update an inventory loss
pub async fn update_loss(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateLossInput>,
) -> AppResult<Json<InventoryLoss>> {
    let service = LossService::new(state.db);
    let loss = service.update(id, input).await?;
    Ok(Json(loss))
}

/// Delete an inventory loss
pub async fn delete_loss(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = LossService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
