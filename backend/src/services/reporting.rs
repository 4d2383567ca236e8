//! Read-only reporting facade over the ledger
//!
//! Combines the entity store with the shared valuation and aggregation
//! engines. Every query reads all of its contributing rows inside one
//! transaction so concurrent writers can never skew a rollup, and no
//! derived value is ever cached.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{PaymentStatus, PaymentTargetRef};
use shared::{
    net_inventory, outstanding_balance, payment_completion_ratio, payments_total,
    purchase_remaining_kgs, purchase_remaining_kgs_exact, purchase_total_amount,
    purchase_total_costs, sale_total_amount, total_purchased_value, total_sales_value,
    PurchaseFigures, SaleFigures,
};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Derived figures for one purchase lot
#[derive(Debug, Serialize)]
pub struct PurchaseTotals {
    pub purchase_id: Uuid,
    pub bought_kgs: Decimal,
    pub total_costs: Decimal,
    pub total_amount: Decimal,
    pub sold_kgs: Decimal,
    pub lost_kgs: Decimal,
    /// Legacy figure: collapses to zero when any operand is zero
    pub remaining_kgs: Decimal,
    /// True arithmetic figure for callers off the legacy rule
    pub remaining_kgs_exact: Decimal,
    pub amount_paid: Decimal,
    pub payment_completion_percent: Decimal,
    pub payment_status: PaymentStatus,
}

/// Derived figures for one sale
#[derive(Debug, Serialize)]
pub struct SaleTotals {
    pub sale_id: Uuid,
    pub quantity_kgs: Decimal,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub payment_completion_percent: Decimal,
    pub payment_status: PaymentStatus,
}

/// Payment standing of a purchase or sale
#[derive(Debug, Serialize)]
pub struct PaymentStatusReport {
    pub target: PaymentTargetRef,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub payment_completion_percent: Decimal,
    pub payment_status: PaymentStatus,
}

/// Money position against one supplier
#[derive(Debug, Serialize)]
pub struct SupplierBalance {
    pub supplier_id: Uuid,
    pub total_purchased_value: Decimal,
    pub amount_paid: Decimal,
    /// Positive: the business still owes the supplier
    pub outstanding_balance: Decimal,
}

/// Money position against one buyer
#[derive(Debug, Serialize)]
pub struct BuyerBalance {
    pub buyer_id: Uuid,
    pub total_sales_value: Decimal,
    pub amount_paid: Decimal,
    /// Positive: the buyer still owes the business
    pub outstanding_balance: Decimal,
}

/// Net weight position for one product type
#[derive(Debug, Serialize)]
pub struct ProductTypeInventory {
    pub product_type_id: Uuid,
    pub bought_kgs: Decimal,
    pub sold_kgs: Decimal,
    pub lost_kgs: Decimal,
    pub net_inventory_kgs: Decimal,
}

/// Optional date-range bounds for balance and inventory queries
#[derive(Debug, Default, Deserialize)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

type PurchaseValueRow = (Decimal, Decimal, Decimal, Decimal, Decimal, Decimal);

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open a repeatable-read transaction so every contributing row of a
    /// rollup comes from one snapshot, even with concurrent writers
    async fn snapshot_tx(&self) -> AppResult<sqlx::Transaction<'_, sqlx::Postgres>> {
        let mut tx = self.db.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Derived money and weight figures for a purchase lot, computed
    /// from its current children in one consistent read
    pub async fn purchase_totals(&self, purchase_id: Uuid) -> AppResult<PurchaseTotals> {
        let mut tx = self.snapshot_tx().await?;

        let row = sqlx::query_as::<_, PurchaseValueRow>(
            r#"
            SELECT bought_kgs, price_per_kg, labour_cost, transportation_cost,
                   trip_cost, maintenance_cost
            FROM purchases WHERE id = $1
            "#,
        )
        .bind(purchase_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Purchase",
            id: purchase_id,
        })?;

        let sold = sqlx::query_scalar::<_, Decimal>(
            "SELECT quantity_kgs FROM sales WHERE purchase_id = $1",
        )
        .bind(purchase_id)
        .fetch_all(&mut *tx)
        .await?;

        let lost = sqlx::query_scalar::<_, Decimal>(
            "SELECT quantity_kgs FROM inventory_losses WHERE purchase_id = $1",
        )
        .bind(purchase_id)
        .fetch_all(&mut *tx)
        .await?;

        let paid = sqlx::query_scalar::<_, Decimal>(
            "SELECT amount FROM payments WHERE purchase_id = $1",
        )
        .bind(purchase_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let (bought_kgs, price_per_kg, labour, transportation, trip, maintenance) = row;
        let total_costs = purchase_total_costs(labour, transportation, trip, maintenance);
        let total_amount = purchase_total_amount(bought_kgs, price_per_kg, total_costs);
        let sold_kgs: Decimal = sold.iter().copied().sum();
        let lost_kgs: Decimal = lost.iter().copied().sum();
        let amount_paid = payments_total(&paid);
        let ratio = payment_completion_ratio(amount_paid, total_amount);

        Ok(PurchaseTotals {
            purchase_id,
            bought_kgs,
            total_costs,
            total_amount,
            sold_kgs,
            lost_kgs,
            remaining_kgs: purchase_remaining_kgs(bought_kgs, sold_kgs, lost_kgs),
            remaining_kgs_exact: purchase_remaining_kgs_exact(bought_kgs, sold_kgs, lost_kgs),
            amount_paid,
            payment_completion_percent: ratio,
            payment_status: PaymentStatus::from_ratio(ratio),
        })
    }

    /// Derived money figures for a sale
    pub async fn sale_totals(&self, sale_id: Uuid) -> AppResult<SaleTotals> {
        let mut tx = self.snapshot_tx().await?;

        let row = sqlx::query_as::<_, (Decimal, Decimal)>(
            "SELECT quantity_kgs, price_per_kg FROM sales WHERE id = $1",
        )
        .bind(sale_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound {
            entity: "Sale",
            id: sale_id,
        })?;

        let paid =
            sqlx::query_scalar::<_, Decimal>("SELECT amount FROM payments WHERE sale_id = $1")
                .bind(sale_id)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;

        let (quantity_kgs, price_per_kg) = row;
        let total_amount = sale_total_amount(quantity_kgs, price_per_kg);
        let amount_paid = payments_total(&paid);
        let ratio = payment_completion_ratio(amount_paid, total_amount);

        Ok(SaleTotals {
            sale_id,
            quantity_kgs,
            total_amount,
            amount_paid,
            payment_completion_percent: ratio,
            payment_status: PaymentStatus::from_ratio(ratio),
        })
    }

    /// Payment standing for a purchase or sale
    pub async fn payment_status(&self, target: PaymentTargetRef) -> AppResult<PaymentStatusReport> {
        let (total_amount, amount_paid, ratio, status) = match target {
            PaymentTargetRef::Purchase(id) => {
                let totals = self.purchase_totals(id).await?;
                (
                    totals.total_amount,
                    totals.amount_paid,
                    totals.payment_completion_percent,
                    totals.payment_status,
                )
            }
            PaymentTargetRef::Sale(id) => {
                let totals = self.sale_totals(id).await?;
                (
                    totals.total_amount,
                    totals.amount_paid,
                    totals.payment_completion_percent,
                    totals.payment_status,
                )
            }
        };

        Ok(PaymentStatusReport {
            target,
            total_amount,
            amount_paid,
            payment_completion_percent: ratio,
            payment_status: status,
        })
    }

    /// Outstanding position against a supplier: everything purchased
    /// from them (costs included) minus purchase-side payments
    pub async fn supplier_balance(
        &self,
        supplier_id: Uuid,
        filter: ReportFilter,
    ) -> AppResult<SupplierBalance> {
        let mut tx = self.snapshot_tx().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(supplier_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound {
                entity: "Supplier",
                id: supplier_id,
            });
        }

        let rows = sqlx::query_as::<_, PurchaseValueRow>(
            r#"
            SELECT bought_kgs, price_per_kg, labour_cost, transportation_cost,
                   trip_cost, maintenance_cost
            FROM purchases
            WHERE supplier_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            "#,
        )
        .bind(supplier_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&mut *tx)
        .await?;

        let paid = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT p.amount
            FROM payments p
            JOIN purchases pu ON pu.id = p.purchase_id
            WHERE pu.supplier_id = $1
              AND p.payment_type = 'PURCHASE'
              AND ($2::date IS NULL OR p.date >= $2)
              AND ($3::date IS NULL OR p.date <= $3)
            "#,
        )
        .bind(supplier_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let figures: Vec<PurchaseFigures> = rows
            .into_iter()
            .map(|(bought_kgs, price_per_kg, labour, transportation, trip, maintenance)| {
                PurchaseFigures {
                    bought_kgs,
                    price_per_kg,
                    total_costs: purchase_total_costs(labour, transportation, trip, maintenance),
                }
            })
            .collect();

        let total_purchased = total_purchased_value(&figures);
        let amount_paid = payments_total(&paid);

        Ok(SupplierBalance {
            supplier_id,
            total_purchased_value: total_purchased,
            amount_paid,
            outstanding_balance: outstanding_balance(total_purchased, amount_paid),
        })
    }

    /// Outstanding position against a buyer: everything sold to them
    /// minus sale-side payments
    pub async fn buyer_balance(
        &self,
        buyer_id: Uuid,
        filter: ReportFilter,
    ) -> AppResult<BuyerBalance> {
        let mut tx = self.snapshot_tx().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM buyers WHERE id = $1)")
                .bind(buyer_id)
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            return Err(AppError::NotFound {
                entity: "Buyer",
                id: buyer_id,
            });
        }

        let rows = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            SELECT quantity_kgs, price_per_kg
            FROM sales
            WHERE buyer_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            "#,
        )
        .bind(buyer_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&mut *tx)
        .await?;

        let paid = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT p.amount
            FROM payments p
            JOIN sales s ON s.id = p.sale_id
            WHERE s.buyer_id = $1
              AND p.payment_type = 'SALE'
              AND ($2::date IS NULL OR p.date >= $2)
              AND ($3::date IS NULL OR p.date <= $3)
            "#,
        )
        .bind(buyer_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let figures: Vec<SaleFigures> = rows
            .into_iter()
            .map(|(quantity_kgs, price_per_kg)| SaleFigures {
                quantity_kgs,
                price_per_kg,
            })
            .collect();

        let total_sales = total_sales_value(&figures);
        let amount_paid = payments_total(&paid);

        Ok(BuyerBalance {
            buyer_id,
            total_sales_value: total_sales,
            amount_paid,
            outstanding_balance: outstanding_balance(total_sales, amount_paid),
        })
    }

    /// Net inventory for a product type as raw movement sums; the
    /// per-lot legacy collapse rule never applies here
    pub async fn product_type_inventory(
        &self,
        product_type_id: Uuid,
        filter: ReportFilter,
    ) -> AppResult<ProductTypeInventory> {
        let mut tx = self.snapshot_tx().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_types WHERE id = $1)",
        )
        .bind(product_type_id)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Err(AppError::NotFound {
                entity: "ProductType",
                id: product_type_id,
            });
        }

        let bought = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT bought_kgs FROM purchases
            WHERE product_type_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            "#,
        )
        .bind(product_type_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&mut *tx)
        .await?;

        let sold = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT s.quantity_kgs
            FROM sales s
            JOIN purchases pu ON pu.id = s.purchase_id
            WHERE pu.product_type_id = $1
              AND ($2::date IS NULL OR s.date >= $2)
              AND ($3::date IS NULL OR s.date <= $3)
            "#,
        )
        .bind(product_type_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&mut *tx)
        .await?;

        let lost = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT l.quantity_kgs
            FROM inventory_losses l
            JOIN purchases pu ON pu.id = l.purchase_id
            WHERE pu.product_type_id = $1
              AND ($2::date IS NULL OR l.date >= $2)
              AND ($3::date IS NULL OR l.date <= $3)
            "#,
        )
        .bind(product_type_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ProductTypeInventory {
            product_type_id,
            bought_kgs: bought.iter().copied().sum(),
            sold_kgs: sold.iter().copied().sum(),
            lost_kgs: lost.iter().copied().sum(),
            net_inventory_kgs: net_inventory(&bought, &sold, &lost),
        })
    }
}
