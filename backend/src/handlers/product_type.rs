//! HTTP handlers for product type endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::product_type::{
    CreateProductTypeInput, ProductType, ProductTypeFilter, ProductTypeService,
    UpdateProductTypeInput,
};
use crate::AppState;

/// Create a product type
pub async fn create_product_type(
    State(state): State<AppState>,
    Json(input): Json<CreateProductTypeInput>,
) -> AppResult<Json<ProductType>> {
    let service = ProductTypeService::new(state.db);
    let product_type = service.create(input).await?;
    Ok(Json(product_type))
}

/// Get a product type
pub async fn get_product_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductType>> {
    let service = ProductTypeService::new(state.db);
    let product_type = service.get(id).await?;
    Ok(Json(product_type))
}

/// List product types with optional free-text search
pub async fn list_product_types(
    State(state): State<AppState>,
    Query(filter): Query<ProductTypeFilter>,
) -> AppResult<Json<Vec<ProductType>>> {
    let service = ProductTypeService::new(state.db);
    let product_types = service.list(filter).await?;
    Ok(Json(product_types))
}

/// Update a product type
pub async fn update_product_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProductTypeInput>,
) -> AppResult<Json<ProductType>> {
    let service = ProductTypeService::new(state.db);
    let product_type = service.update(id, input).await?;
    Ok(Json(product_type))
}

/// Delete a product type (blocked while purchases reference it)
pub async fn delete_product_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ProductTypeService::new(state.db);
    service.delete(id).await?;
    Ok(Json(()))
}
