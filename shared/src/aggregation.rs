//! Cross-entity rollups over filtered record sets
//!
//! Callers fetch every contributing row inside one consistent read and
//! hand the figures here; each rollup is a single pass over its slice
//! with no per-row re-queries.

use rust_decimal::Decimal;

use crate::valuation::{purchase_total_amount, sale_total_amount};

/// The value-bearing fields of one purchase lot
#[derive(Debug, Clone, Copy)]
pub struct PurchaseFigures {
    pub bought_kgs: Decimal,
    pub price_per_kg: Decimal,
    pub total_costs: Decimal,
}

/// The value-bearing fields of one sale
#[derive(Debug, Clone, Copy)]
pub struct SaleFigures {
    pub quantity_kgs: Decimal,
    pub price_per_kg: Decimal,
}

/// Total purchased value across a supplier's lots, cost components
/// included. Each lot is valued with its own (legacy-collapsing)
/// total-amount rule.
pub fn total_purchased_value(purchases: &[PurchaseFigures]) -> Decimal {
    purchases
        .iter()
        .map(|p| purchase_total_amount(p.bought_kgs, p.price_per_kg, p.total_costs))
        .sum()
}

/// Total sales value across a buyer's sales.
pub fn total_sales_value(sales: &[SaleFigures]) -> Decimal {
    sales
        .iter()
        .map(|s| sale_total_amount(s.quantity_kgs, s.price_per_kg))
        .sum()
}

/// Sum of payment amounts.
pub fn payments_total(amounts: &[Decimal]) -> Decimal {
    amounts.iter().copied().sum()
}

/// Value owed minus value settled. Positive means the counterparty is
/// still owed; zero or negative means settled or overpaid.
pub fn outstanding_balance(total_value: Decimal, amount_paid: Decimal) -> Decimal {
    total_value - amount_paid
}

/// Net weight on hand for a product type: everything bought minus
/// everything sold minus everything lost, as raw sums over the
/// individual movements. The per-lot zero-collapse rule deliberately
/// does NOT apply here; collapsing would compound across lots.
pub fn net_inventory(
    bought_kgs: &[Decimal],
    sold_kgs: &[Decimal],
    lost_kgs: &[Decimal],
) -> Decimal {
    let bought: Decimal = bought_kgs.iter().copied().sum();
    let sold: Decimal = sold_kgs.iter().copied().sum();
    let lost: Decimal = lost_kgs.iter().copied().sum();
    bought - sold - lost
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn net_inventory_is_raw_sum() {
        // No collapse even though the loss list is short and one lot
        // would individually collapse.
        let bought = [dec("100"), dec("50")];
        let sold = [dec("20")];
        let lost = [dec("5")];
        assert_eq!(net_inventory(&bought, &sold, &lost), dec("125"));
    }

    #[test]
    fn empty_slices_roll_up_to_zero() {
        assert_eq!(net_inventory(&[], &[], &[]), Decimal::ZERO);
        assert_eq!(total_purchased_value(&[]), Decimal::ZERO);
        assert_eq!(payments_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn outstanding_balance_signs() {
        assert_eq!(outstanding_balance(dec("1000"), dec("400")), dec("600"));
        assert_eq!(outstanding_balance(dec("1000"), dec("1000")), Decimal::ZERO);
        assert_eq!(outstanding_balance(dec("1000"), dec("1200")), dec("-200"));
    }
}
