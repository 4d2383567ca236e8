//! Inventory loss management service
//!
//! Shrinkage recorded against a purchase lot: spillage, spoilage,
//! drying weight loss and the like.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_non_negative, validate_required_text};

/// Inventory loss service
#[derive(Clone)]
pub struct LossService {
    db: PgPool,
}

/// Inventory loss record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryLoss {
    pub id: Uuid,
    pub date: NaiveDate,
    pub purchase_id: Uuid,
    pub quantity_kgs: Decimal,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording an inventory loss
#[derive(Debug, Deserialize)]
pub struct CreateLossInput {
    pub date: NaiveDate,
    pub purchase_id: Uuid,
    pub quantity_kgs: Decimal,
    pub reason: String,
}

/// Input for updating an inventory loss
#[derive(Debug, Deserialize)]
pub struct UpdateLossInput {
    pub date: Option<NaiveDate>,
    pub quantity_kgs: Option<Decimal>,
    pub reason: Option<String>,
}

/// Filter for loss listings
#[derive(Debug, Deserialize)]
pub struct LossFilter {
    pub purchase_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

const LOSS_COLUMNS: &str =
    "id, date, purchase_id, quantity_kgs, reason, created_at, updated_at";

impl LossService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn validate(quantity_kgs: Decimal, reason: &str) -> AppResult<()> {
        validate_non_negative(quantity_kgs).map_err(|message| AppError::Validation {
            entity: "InventoryLoss",
            field: "quantity_kgs",
            message: message.to_string(),
        })?;
        validate_required_text(reason).map_err(|message| AppError::Validation {
            entity: "InventoryLoss",
            field: "reason",
            message: message.to_string(),
        })?;
        Ok(())
    }

    /// Record a loss against a purchase lot
    pub async fn create(&self, input: CreateLossInput) -> AppResult<InventoryLoss> {
        Self::validate(input.quantity_kgs, &input.reason)?;

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

        let loss = sqlx::query_as::<_, InventoryLoss>(&format!(
            r#"
            INSERT INTO inventory_losses (date, purchase_id, quantity_kgs, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING {LOSS_COLUMNS}
            "#
        ))
        .bind(input.date)
        .bind(input.purchase_id)
        .bind(input.quantity_kgs)
        .bind(&input.reason)
        .fetch_one(&self.db)
        .await?;

        Ok(loss)
    }

    /// Get a loss by id
    pub async fn get(&self, id: Uuid) -> AppResult<InventoryLoss> {
        sqlx::query_as::<_, InventoryLoss>(&format!(
            "SELECT {LOSS_COLUMNS} FROM inventory_losses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound {
            entity: "InventoryLoss",
            id,
        })
    }

    /// List losses, newest first, with optional purchase / date-range
    /// filters
    pub async fn list(&self, filter: LossFilter) -> AppResult<Vec<InventoryLoss>> {
        let losses = sqlx::query_as::<_, InventoryLoss>(&format!(
            r#"
            SELECT {LOSS_COLUMNS}
            FROM inventory_losses
            WHERE ($1::uuid IS NULL OR purchase_id = $1)
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC, created_at DESC
            "#
        ))
        .bind(filter.purchase_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(losses)
    }

    /// Update a loss
    pub async fn update(&self, id: Uuid, input: UpdateLossInput) -> AppResult<InventoryLoss> {
        let existing = self.get(id).await?;

        let date = input.date.unwrap_or(existing.date);
        let quantity_kgs = input.quantity_kgs.unwrap_or(existing.quantity_kgs);
        let reason = input.reason.unwrap_or(existing.reason);

        Self::validate(quantity_kgs, &reason)?;

        let loss = sqlx::query_as::<_, InventoryLoss>(&format!(
            r#"
            UPDATE inventory_losses
            SET date = $1, quantity_kgs = $2, reason = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING {LOSS_COLUMNS}
            "#
        ))
        .bind(date)
        .bind(quantity_kgs)
        .bind(&reason)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(loss)
    }

    /// Delete a loss
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inventory_losses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                entity: "InventoryLoss",
                id,
            });
        }

        Ok(())
    }
}
