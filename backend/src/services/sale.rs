//! Sale management service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validate_non_negative;

/// Sale service for resales out of purchase lots
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Sale record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub date: NaiveDate,
    pub purchase_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity_kgs: Decimal,
    pub price_per_kg: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a sale
#[derive(Debug, Deserialize)]
pub struct CreateSaleInput {
    pub date: NaiveDate,
    pub purchase_id: Uuid,
    pub buyer_id: Uuid,
    pub quantity_kgs: Decimal,
    pub price_per_kg: Decimal,
    pub notes: Option<String>,
}

/// Input for updating a sale
#[derive(Debug, Deserialize)]
pub struct UpdateSaleInput {
    pub date: Option<NaiveDate>,
    pub quantity_kgs: Option<Decimal>,
    pub price_per_kg: Option<Decimal>,
    pub notes: Option<String>,
}

/// Filter for sale listings
#[derive(Debug, Deserialize)]
pub struct SaleFilter {
    pub purchase_id: Option<Uuid>,
    pub buyer_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

const SALE_COLUMNS: &str =
    "id, date, purchase_id, buyer_id, quantity_kgs, price_per_kg, notes, created_at, updated_at";

impl SaleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn validate_amounts(quantity_kgs: Decimal, price_per_kg: Decimal) -> AppResult<()> {
        for (field, value) in [("quantity_kgs", quantity_kgs), ("price_per_kg", price_per_kg)] {
            validate_non_negative(value).map_err(|message| AppError::Validation {
                entity: "Sale",
                field,
                message: message.to_string(),
            })?;
        }
        Ok(())
    }

    /// Record a sale out of a purchase lot
    pub async fn create(&self, input: CreateSaleInput) -> AppResult<Sale> {
        Self::validate_amounts(input.quantity_kgs, input.price_per_kg)?;

        let purchase_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM purchases WHERE id = $1)")
                .bind(input.purchase_id)
                .fetch_one(&self.db)
                .await?;
        if !purchase_exists {
            return Err(AppError::NotFound {
                entity: "Purchase",
                id: input.purchase_id,
            });
        }

        let buyer_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM buyers WHERE id = $1)")
                .bind(input.buyer_id)
                .fetch_one(&self.db)
                .await?;
        if !buyer_exists {
            return Err(AppError::NotFound {
                entity: "Buyer",
                id: input.buyer_id,
            });
        }

        let sale = sqlx::query_as::<_, Sale>(&format!(
            r#"
            INSERT INTO sales (date, purchase_id, buyer_id, quantity_kgs, price_per_kg, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SALE_COLUMNS}
            "#
        ))
        .bind(input.date)
        .bind(input.purchase_id)
        .bind(input.buyer_id)
        .bind(input.quantity_kgs)
        .bind(input.price_per_kg)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(sale)
    }

    /// Get a sale by id
    pub async fn get(&self, id: Uuid) -> AppResult<Sale> {
        sqlx::query_as::<_, Sale>(&format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(AppError::NotFound { entity: "Sale", id })
    }

    /// List sales, newest first, with optional purchase / buyer /
    /// date-range filters
    pub async fn list(&self, filter: SaleFilter) -> AppResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            r#"
            SELECT {SALE_COLUMNS}
            FROM sales
            WHERE ($1::uuid IS NULL OR purchase_id = $1)
              AND ($2::uuid IS NULL OR buyer_id = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY date DESC, created_at DESC
            "#
        ))
        .bind(filter.purchase_id)
        .bind(filter.buyer_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// Update a sale. Purchase lot and buyer are fixed at creation.
    pub async fn update(&self, id: Uuid, input: UpdateSaleInput) -> AppResult<Sale> {
        let existing = self.get(id).await?;

        let date = input.date.unwrap_or(existing.date);
        let quantity_kgs = input.quantity_kgs.unwrap_or(existing.quantity_kgs);
        let price_per_kg = input.price_per_kg.unwrap_or(existing.price_per_kg);
        let notes = input.notes.or(existing.notes);

        Self::validate_amounts(quantity_kgs, price_per_kg)?;

        let sale = sqlx::query_as::<_, Sale>(&format!(
            r#"
            UPDATE sales
            SET date = $1, quantity_kgs = $2, price_per_kg = $3, notes = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {SALE_COLUMNS}
            "#
        ))
        .bind(date)
        .bind(quantity_kgs)
        .bind(price_per_kg)
        .bind(&notes)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(sale)
    }

    /// Delete a sale. Blocked while any payment references it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let child_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments WHERE sale_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        super::ensure_no_children("Sale", id, "Payment", child_count)?;

        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound { entity: "Sale", id });
        }

        tx.commit().await?;
        Ok(())
    }
}
