//! Route definitions for the AgriTrade Management Platform

use axum::{
    routing::get,
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Counterparties
        .nest("/suppliers", supplier_routes())
        .nest("/buyers", buyer_routes())
        // Produce
        .nest("/product-types", product_type_routes())
        // Transactions
        .nest("/purchases", purchase_routes())
        .nest("/sales", sale_routes())
        .nest("/payments", payment_routes())
        .nest("/losses", loss_routes())
}

/// Supplier CRUD plus the supplier balance report
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route("/:id/balance", get(handlers::get_supplier_balance))
}

/// Buyer CRUD plus the buyer balance report
fn buyer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_buyers).post(handlers::create_buyer))
        .route(
            "/:id",
            get(handlers::get_buyer)
                .put(handlers::update_buyer)
                .delete(handlers::delete_buyer),
        )
        .route("/:id/balance", get(handlers::get_buyer_balance))
}

/// Product type CRUD plus the net inventory report
fn product_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_product_types).post(handlers::create_product_type),
        )
        .route(
            "/:id",
            get(handlers::get_product_type)
                .put(handlers::update_product_type)
                .delete(handlers::delete_product_type),
        )
        .route("/:id/inventory", get(handlers::get_product_type_inventory))
}

/// Purchase CRUD plus derived totals and payment standing
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchases).post(handlers::create_purchase),
        )
        .route(
            "/:id",
            get(handlers::get_purchase)
                .put(handlers::update_purchase)
                .delete(handlers::delete_purchase),
        )
        .route("/:id/totals", get(handlers::get_purchase_totals))
        .route(
            "/:id/payment-status",
            get(handlers::get_purchase_payment_status),
        )
}

/// Sale CRUD plus derived totals and payment standing
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::create_sale))
        .route(
            "/:id",
            get(handlers::get_sale)
                .put(handlers::update_sale)
                .delete(handlers::delete_sale),
        )
        .route("/:id/totals", get(handlers::get_sale_totals))
        .route("/:id/payment-status", get(handlers::get_sale_payment_status))
}

/// Payment CRUD
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_payments).post(handlers::create_payment),
        )
        .route(
            "/:id",
            get(handlers::get_payment)
                .put(handlers::update_payment)
                .delete(handlers::delete_payment),
        )
}

/// Inventory loss CRUD
fn loss_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_losses).post(handlers::create_loss))
        .route(
            "/:id",
            get(handlers::get_loss)
                .put(handlers::update_loss)
                .delete(handlers::delete_loss),
        )
}
