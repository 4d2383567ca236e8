//! Supplier management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validate_required_text;

/// Supplier service for counterparties the business buys from
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Supplier record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Filter for supplier listings
#[derive(Debug, Deserialize)]
pub struct SupplierFilter {
    /// Free-text match against name and phone
    pub search: Option<String>,
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a supplier
    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        validate_required_text(&input.name).map_err(|message| AppError::Validation {
            entity: "Supplier",
            field: "name",
            message: message.to_string(),
        })?;

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, phone, address)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone, address, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Get a supplier by id
    pub async fn get(&self, id: Uuid) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            "SELECT id, name, phone, address, created_at, updated_at FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Supplier",
            id,
        })
    }

    /// List suppliers, optionally matched against name or phone
    pub async fn list(&self, filter: SupplierFilter) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, phone, address, created_at, updated_at
            FROM suppliers
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR phone ILIKE '%' || $1 || '%')
            ORDER BY name ASC
            "#,
        )
        .bind(&filter.search)
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Update a supplier
    pub async fn update(&self, id: Uuid, input: UpdateSupplierInput) -> AppResult<Supplier> {
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let phone = input.phone.or(existing.phone);
        let address = input.address.or(existing.address);

        validate_required_text(&name).map_err(|message| AppError::Validation {
            entity: "Supplier",
            field: "name",
            message: message.to_string(),
        })?;

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $1, phone = $2, address = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, name, phone, address, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&phone)
        .bind(&address)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Delete a supplier. Blocked while any purchase references it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let child_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM purchases WHERE supplier_id = $1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        super::ensure_no_children("Supplier", id, "Purchase", child_count)?;

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                entity: "Supplier",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}
