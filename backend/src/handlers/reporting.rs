//! HTTP handlers for derived-value reporting endpoints
//!
//! Read-only projections; no mutation passes through here.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::reporting::{
    BuyerBalance, PaymentStatusReport, ProductTypeInventory, PurchaseTotals, ReportFilter,
    ReportingService, SaleTotals, SupplierBalance,
};
use crate::models::PaymentTargetRef;
use crate::AppState;

/// Derived money and weight figures for a purchase lot
pub async fn get_purchase_totals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PurchaseTotals>> {
    let service = ReportingService::new(state.db);
    let totals = service.purchase_totals(id).await?;
    Ok(Json(totals))
}

/// Derived money figures for a sale
pub async fn get_sale_totals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SaleTotals>> {
    let service = ReportingService::new(state.db);
    let totals = service.sale_totals(id).await?;
    Ok(Json(totals))
}

/// Payment standing of a purchase lot
pub async fn get_purchase_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentStatusReport>> {
    let service = ReportingService::new(state.db);
    let report = service.payment_status(PaymentTargetRef::Purchase(id)).await?;
    Ok(Json(report))
}

/// Payment standing of a sale
pub async fn get_sale_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PaymentStatusReport>> {
    let service = ReportingService::new(state.db);
    let report = service.payment_status(PaymentTargetRef::Sale(id)).await?;
    Ok(Json(report))
}

/// Outstanding balance against a supplier
pub async fn get_supplier_balance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<SupplierBalance>> {
    let service = ReportingService::new(state.db);
    let balance = service.supplier_balance(id, filter).await?;
    Ok(Json(balance))
}

/// Outstanding balance against a buyer
pub async fn get_buyer_balance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<BuyerBalance>> {
    let service = ReportingService::new(state.db);
    let balance = service.buyer_balance(id, filter).await?;
    Ok(Json(balance))
}

/// Net inventory for a product type
pub async fn get_product_type_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<ProductTypeInventory>> {
    let service = ReportingService::new(state.db);
    let inventory = service.product_type_inventory(id, filter).await?;
    Ok(Json(inventory))
}
