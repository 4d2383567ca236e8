//! Payment management service
//!
//! Payments are simple sums against a purchase (money paid out) or a
//! sale (money received); they are never allocated to specific costs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::PaymentType;
use shared::{validate_non_negative, validate_payment_target};

/// Payment service for settlements on both sides of the ledger
#[derive(Clone)]
pub struct PaymentService {
    db: PgPool,
}

/// Payment record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub payment_type: String,
    pub purchase_id: Option<Uuid>,
    pub sale_id: Option<Uuid>,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a payment
#[derive(Debug, Deserialize)]
pub struct CreatePaymentInput {
    pub date: NaiveDate,
    pub payment_type: PaymentType,
    pub purchase_id: Option<Uuid>,
    pub sale_id: Option<Uuid>,
    pub amount: Decimal,
    pub notes: Option<String>,
}

/// Input for updating a payment. A payment may be retargeted by sending
/// a new type and/or target id; the pairing is re-validated as on create.
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentInput {
    pub date: Option<NaiveDate>,
    pub payment_type: Option<PaymentType>,
    pub purchase_id: Option<Uuid>,
    pub sale_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Filter for payment listings
#[derive(Debug, Deserialize)]
pub struct PaymentFilter {
    pub payment_type: Option<PaymentType>,
    pub purchase_id: Option<Uuid>,
    pub sale_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

const PAYMENT_COLUMNS: &str =
    "id, date, payment_type, purchase_id, sale_id, amount, notes, created_at, updated_at";

/// Resolve the target of an updated payment. Explicit ids win; with no
/// ids given, the stored target is kept only while the type is unchanged,
/// since a flipped type invalidates the old pairing.
fn merge_target(
    requested: (Option<Uuid>, Option<Uuid>),
    current: (Option<Uuid>, Option<Uuid>),
    type_unchanged: bool,
) -> (Option<Uuid>, Option<Uuid>) {
    match requested {
        (None, None) if type_unchanged => current,
        (None, None) => (None, None),
        ids => ids,
    }
}

impl PaymentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a payment against a purchase or a sale
    pub async fn create(&self, input: CreatePaymentInput) -> AppResult<Payment> {
        validate_non_negative(input.amount).map_err(|message| AppError::Validation {
            entity: "Payment",
            field: "amount",
            message: message.to_string(),
        })?;

        validate_payment_target(
            input.payment_type,
            input.purchase_id.is_some(),
            input.sale_id.is_some(),
        )
        .map_err(|message| AppError::Validation {
            entity: "Payment",
            field: "payment_type",
            message: message.to_string(),
        })?;

        self.ensure_target_exists(input.purchase_id, input.sale_id)
            .await?;

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (date, payment_type, purchase_id, sale_id, amount, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(input.date)
        .bind(input.payment_type.as_str())
        .bind(input.purchase_id)
        .bind(input.sale_id)
        .bind(input.amount)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(payment)
    }

    /// Get a payment by id
    pub async fn get(&self, id: Uuid) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Payment",
            id,
        })
    }

    /// List payments, newest first, with optional type / target /
    /// date-range filters
    pub async fn list(&self, filter: PaymentFilter) -> AppResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE ($1::text IS NULL OR payment_type = $1)
              AND ($2::uuid IS NULL OR purchase_id = $2)
              AND ($3::uuid IS NULL OR sale_id = $3)
              AND ($4::date IS NULL OR date >= $4)
              AND ($5::date IS NULL OR date <= $5)
            ORDER BY date DESC, created_at DESC
            "#
        ))
        .bind(filter.payment_type.map(|t| t.as_str()))
        .bind(filter.purchase_id)
        .bind(filter.sale_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(payments)
    }

    /// Update a payment, including moving it to a different purchase or
    /// sale. Retargeting across sides needs the new side's id in the
    /// same request, otherwise the pairing check rejects the update.
    pub async fn update(&self, id: Uuid, input: UpdatePaymentInput) -> AppResult<Payment> {
        let existing = self.get(id).await?;

        let date = input.date.unwrap_or(existing.date);
        let amount = input.amount.unwrap_or(existing.amount);
        let notes = input.notes.or(existing.notes);

        let payment_type = match input.payment_type {
            Some(payment_type) => payment_type,
            None => existing.payment_type.parse::<PaymentType>().map_err(|e| {
                AppError::Internal(anyhow::anyhow!("payment {id}: stored {e}"))
            })?,
        };
        let type_unchanged = payment_type.as_str() == existing.payment_type;

        let (purchase_id, sale_id) = merge_target(
            (input.purchase_id, input.sale_id),
            (existing.purchase_id, existing.sale_id),
            type_unchanged,
        );

        validate_non_negative(amount).map_err(|message| AppError::Validation {
            entity: "Payment",
            field: "amount",
            message: message.to_string(),
        })?;

        validate_payment_target(payment_type, purchase_id.is_some(), sale_id.is_some()).map_err(
            |message| AppError::Validation {
                entity: "Payment",
                field: "payment_type",
                message: message.to_string(),
            },
        )?;

        self.ensure_target_exists(purchase_id, sale_id).await?;

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments
            SET date = $1, payment_type = $2, purchase_id = $3, sale_id = $4,
                amount = $5, notes = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(date)
        .bind(payment_type.as_str())
        .bind(purchase_id)
        .bind(sale_id)
        .bind(amount)
        .bind(&notes)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(payment)
    }

    /// Verify that whichever target ids are set point at live rows
    async fn ensure_target_exists(
        &self,
        purchase_id: Option<Uuid>,
        sale_id: Option<Uuid>,
    ) -> AppResult<()> {
        if let Some(purchase_id) = purchase_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM purchases WHERE id = $1)",
            )
            .bind(purchase_id)
            .fetch_one(&self.db)
            .await?;
            if !exists {
                return Err(AppError::NotFound {
                    entity: "Purchase",
                    id: purchase_id,
                });
            }
        }

        if let Some(sale_id) = sale_id {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sales WHERE id = $1)")
                    .bind(sale_id)
                    .fetch_one(&self.db)
                    .await?;
            if !exists {
                return Err(AppError::NotFound {
                    entity: "Sale",
                    id: sale_id,
                });
            }
        }

        Ok(())
    }

    /// Delete a payment
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound {
                entity: "Payment",
                id,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_without_target_fields_keeps_the_stored_target() {
        let purchase = Uuid::new_v4();
        assert_eq!(
            merge_target((None, None), (Some(purchase), None), true),
            (Some(purchase), None)
        );
    }

    #[test]
    fn update_can_move_a_payment_to_another_lot_on_the_same_side() {
        let old_purchase = Uuid::new_v4();
        let new_purchase = Uuid::new_v4();
        assert_eq!(
            merge_target((Some(new_purchase), None), (Some(old_purchase), None), true),
            (Some(new_purchase), None)
        );
    }

    #[test]
    fn retargeting_across_sides_replaces_the_old_target() {
        let purchase = Uuid::new_v4();
        let sale = Uuid::new_v4();
        // PURCHASE -> SALE with the sale id supplied
        let (purchase_id, sale_id) =
            merge_target((None, Some(sale)), (Some(purchase), None), false);
        assert_eq!((purchase_id, sale_id), (None, Some(sale)));
        assert!(validate_payment_target(
            PaymentType::Sale,
            purchase_id.is_some(),
            sale_id.is_some()
        )
        .is_ok());
    }

    #[test]
    fn flipping_the_type_without_a_new_target_fails_the_pairing_check() {
        let purchase = Uuid::new_v4();
        let (purchase_id, sale_id) = merge_target((None, None), (Some(purchase), None), false);
        assert_eq!((purchase_id, sale_id), (None, None));
        assert!(validate_payment_target(
            PaymentType::Sale,
            purchase_id.is_some(),
            sale_id.is_some()
        )
        .is_err());
    }
}
