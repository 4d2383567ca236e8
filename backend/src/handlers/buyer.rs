//! HTTP handlers for buyer endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::buyer::{
    Buyer, BuyerFilter, BuyerService, CreateBuyerInput, UpdateBuyerInput,
};
use crate::AppState;

/// Create a buyer
pub async fn create_buyer(
    State(state): State<AppState>,
    Json(input): Json<CreateBuyerInput>,
) -> AppResult<Json<Buyer>> {
    let service = BuyerService::new(state.db);
    let buyer = service.create(input).await?;
    Ok(Json(buyer))
}

/// Get a buyer
pub async fn get_buyer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Buyer>> {
    let service = BuyerService::new(state.db);
    let buyer = service.get(id).await?;
    Ok(Json(buyer))
}

/// List buyers with optional free-text search
pub async fn list_buyers(
    State(state): State<AppState>,
    Query(filter): Query<BuyerFilter>,
) -> AppResult<Json<Vec<Buyer>>> {
    let service = BuyerService::new(state.db);
    let buyers = service.list(filter).await?;
    Ok(Json(buyers))
}

/// Update a buyer
pub async fn update_buyer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBuyerInput>,
) -> AppResult<Json<Buyer>> {
    let service = BuyerService::new(state.db);
    let buyer = service.update(id, input).await?;
    Ok(Json(buyer))
}

/// Delete a buyer (blocked while sales reference it)
pub async fn delete_buyer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = BuyerService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
