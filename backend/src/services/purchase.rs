//! Purchase lot management service
//!
//! A purchase is the aggregation root for its sales, losses and
//! purchase-side payments; it cannot be deleted while any child exists.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validate_non_negative;

/// Purchase service for lots bought from suppliers
#[derive(Clone)]
pub struct PurchaseService {
    db: PgPool,
}

/// Purchase lot record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Purchase {
    pub id: Uuid,
    pub date: NaiveDate,
    pub supplier_id: Uuid,
    pub product_type_id: Uuid,
    pub bought_kgs: Decimal,
    pub price_per_kg: Decimal,
    pub labour_cost: Decimal,
    pub transportation_cost: Decimal,
    pub trip_cost: Decimal,
    pub maintenance_cost: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a purchase
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseInput {
    pub date: NaiveDate,
    pub supplier_id: Uuid,
    pub product_type_id: Uuid,
    pub bought_kgs: Decimal,
    pub price_per_kg: Decimal,
    #[serde(default)]
    pub labour_cost: Decimal,
    #[serde(default)]
    pub transportation_cost: Decimal,
    #[serde(default)]
    pub trip_cost: Decimal,
    #[serde(default)]
    pub maintenance_cost: Decimal,
    pub notes: Option<String>,
}

/// Input for updating a purchase
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseInput {
    pub date: Option<NaiveDate>,
    pub bought_kgs: Option<Decimal>,
    pub price_per_kg: Option<Decimal>,
    pub labour_cost: Option<Decimal>,
    pub transportation_cost: Option<Decimal>,
    pub trip_cost: Option<Decimal>,
    pub maintenance_cost: Option<Decimal>,
    pub notes: Option<String>,
}

/// Filter for purchase listings
#[derive(Debug, Deserialize)]
pub struct PurchaseFilter {
    pub supplier_id: Option<Uuid>,
    pub product_type_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

const PURCHASE_COLUMNS: &str = "id, date, supplier_id, product_type_id, bought_kgs, price_per_kg, \
     labour_cost, transportation_cost, trip_cost, maintenance_cost, notes, created_at, updated_at";

impl PurchaseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn validate_amounts(fields: &[(&'static str, Decimal)]) -> AppResult<()> {
        for &(field, value) in fields {
            validate_non_negative(value).map_err(|message| AppError::Validation {
                entity: "Purchase",
                field,
                message: message.to_string(),
            })?;
        }
        Ok(())
    }

    /// Record a purchase lot
    pub async fn create(&self, input: CreatePurchaseInput) -> AppResult<Purchase> {
        Self::validate_amounts(&[
            ("bought_kgs", input.bought_kgs),
            ("price_per_kg", input.price_per_kg),
            ("labour_cost", input.labour_cost),
            ("transportation_cost", input.transportation_cost),
            ("trip_cost", input.trip_cost),
            ("maintenance_cost", input.maintenance_cost),
        ])?;

        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&self.db)
                .await?;
        if !supplier_exists {
            return Err(AppError::NotFound {
                entity: "Supplier",
                id: input.supplier_id,
            });
        }

        let product_type_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_types WHERE id = $1)",
        )
        .bind(input.product_type_id)
        .fetch_one(&self.db)
        .await?;
        if !product_type_exists {
            return Err(AppError::NotFound {
                entity: "ProductType",
                id: input.product_type_id,
            });
        }

        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            INSERT INTO purchases (
                date, supplier_id, product_type_id, bought_kgs, price_per_kg,
                labour_cost, transportation_cost, trip_cost, maintenance_cost, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(input.date)
        .bind(input.supplier_id)
        .bind(input.product_type_id)
        .bind(input.bought_kgs)
        .bind(input.price_per_kg)
        .bind(input.labour_cost)
        .bind(input.transportation_cost)
        .bind(input.trip_cost)
        .bind(input.maintenance_cost)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(purchase)
    }

    /// Get a purchase by id
    pub async fn get(&self, id: Uuid) -> AppResult<Purchase> {
        sqlx::query_as::<_, Purchase>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Purchase",
            id,
        })
    }

    /// List purchases, newest first, with optional supplier / product type
    /// / date-range filters
    pub async fn list(&self, filter: PurchaseFilter) -> AppResult<Vec<Purchase>> {
        let purchases = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            SELECT {PURCHASE_COLUMNS}
            FROM purchases
            WHERE ($1::uuid IS NULL OR supplier_id = $1)
              AND ($2::uuid IS NULL OR product_type_id = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY date DESC, created_at DESC
            "#
        ))
        .bind(filter.supplier_id)
        .bind(filter.product_type_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(purchases)
    }

    /// Update a purchase. Supplier and product type are fixed at creation.
    pub async fn update(&self, id: Uuid, input: UpdatePurchaseInput) -> AppResult<Purchase> {
        let existing = self.get(id).await?;

        let date = input.date.unwrap_or(existing.date);
        let bought_kgs = input.bought_kgs.unwrap_or(existing.bought_kgs);
        let price_per_kg = input.price_per_kg.unwrap_or(existing.price_per_kg);
        let labour_cost = input.labour_cost.unwrap_or(existing.labour_cost);
        let transportation_cost = input
            .transportation_cost
            .unwrap_or(existing.transportation_cost);
        let trip_cost = input.trip_cost.unwrap_or(existing.trip_cost);
        let maintenance_cost = input.maintenance_cost.unwrap_or(existing.maintenance_cost);
        let notes = input.notes.or(existing.notes);

        Self::validate_amounts(&[
            ("bought_kgs", bought_kgs),
            ("price_per_kg", price_per_kg),
            ("labour_cost", labour_cost),
            ("transportation_cost", transportation_cost),
            ("trip_cost", trip_cost),
            ("maintenance_cost", maintenance_cost),
        ])?;

        let purchase = sqlx::query_as::<_, Purchase>(&format!(
            r#"
            UPDATE purchases
            SET date = $1, bought_kgs = $2, price_per_kg = $3, labour_cost = $4,
                transportation_cost = $5, trip_cost = $6, maintenance_cost = $7,
                notes = $8, updated_at = NOW()
            WHERE id = $9
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(date)
        .bind(bought_kgs)
        .bind(price_per_kg)
        .bind(labour_cost)
        .bind(transportation_cost)
        .bind(trip_cost)
        .bind(maintenance_cost)
        .bind(&notes)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(purchase)
    }

    /// Delete a purchase. Blocked while any sale, payment or loss
    /// references it, so financial history is never orphaned.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let children: [(&'static str, &str); 3] = [
            ("Sale", "SELECT COUNT(*) FROM sales WHERE purchase_id = $1"),
            ("Payment", "SELECT COUNT(*) FROM payments WHERE purchase_id = $1"),
            (
                "InventoryLoss",
                "SELECT COUNT(*) FROM inventory_losses WHERE purchase_id = $1",
            ),
        ];

        for (child_entity, query) in children {
            let child_count = sqlx::query_scalar::<_, i64>(query)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
            super::ensure_no_children("Purchase", id, child_entity, child_count)?;
        }

        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                entity: "Purchase",
                id,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}
