//! Buyer management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validate_required_text;

/// Buyer service for counterparties the business sells to
#[derive(Clone)]
pub struct BuyerService {
    db: PgPool,
}

/// Buyer record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Buyer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a buyer
#[derive(Debug, Deserialize)]
pub struct CreateBuyerInput {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Input for updating a buyer
#[derive(Debug, Deserialize)]
pub struct UpdateBuyerInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Filter for buyer listings
#[derive(Debug, Deserialize)]
pub struct BuyerFilter {
    /// Free-text match against name and phone
    pub search: Option<String>,
}

impl BuyerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a buyer
    pub async fn create(&self, input: CreateBuyerInput) -> AppResult<Buyer> {
        validate_required_text(&input.name).map_err(|message| AppError::Validation {
            entity: "Buyer",
            field: "name",
            message: message.to_string(),
        })?;

        let buyer = sqlx::query_as::<_, Buyer>(
            r#"
            INSERT INTO buyers (name, phone, address)
            VALUES ($1, $2, $3)
            RETURNING id, name, phone, address, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        Ok(buyer)
    }

    /// Get a buyer by id
    pub async fn get(&self, id: Uuid) -> AppResult<Buyer> {
        sqlx::query_as::<_, Buyer>(
            "SELECT id, name, phone, address, created_at, updated_at FROM buyers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Buyer",
            id,
        })
    }

    /// List buyers, optionally matched against name or phone
    pub async fn list(&self, filter: BuyerFilter) -> AppResult<Vec<Buyer>> {
        let buyers = sqlx::query_as::<_, Buyer>(
            r#"
            SELECT id, name, phone, address, created_at, updated_at
            FROM buyers
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR phone ILIKE '%' || $1 || '%')
            ORDER BY name ASC
            "#,
        )
        .bind(&filter.search)
        .fetch_all(&self.db)
        .await?;

        Ok(buyers)
    }

    /// Update a buyer
    pub async fn update(&self, id: Uuid, input: UpdateBuyerInput) -> AppResult<Buyer> {
        let existing = self.get(id).await?;

        let name = input.name.unwrap_or(existing.name);
        let phone = input.phone.or(existing.phone);
        let address = input.address.or(existing.address);

        validate_required_text(&name).map_err(|message| AppError::Validation {
            entity: "Buyer",
            field: "name",
            message: message.to_string(),
        })?;

        let buyer = sqlx::query_as::<_, Buyer>(
            r#"
            UPDATE buyers
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

        Ok(buyer)
    }

    /// Delete a buyer. Blocked while any sale references it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let child_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sales WHERE buyer_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        super::ensure_no_children("Buyer", id, "Sale", child_count)?;

        let result = sqlx::query("DELETE FROM buyers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                entity: "Buyer",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}
