//! Per-record valuations for purchases, sales and payments
//!
//! All figures are exact `Decimal` arithmetic, recomputed from current
//! records on every call. Several functions carry the legacy
//! "zero-collapse" rule from the books this system was migrated from:
//! when any contributing operand is exactly zero the whole figure is
//! defined as zero instead of the partial result. Exact variants are
//! provided for callers cutting over to true arithmetic.

use rust_decimal::Decimal;

/// Sum of a purchase's four side costs. A true sum, never collapsed.
pub fn purchase_total_costs(
    labour_cost: Decimal,
    transportation_cost: Decimal,
    trip_cost: Decimal,
    maintenance_cost: Decimal,
) -> Decimal {
    labour_cost + transportation_cost + trip_cost + maintenance_cost
}

/// Total money value of a purchase lot: weight x unit price + side costs.
///
/// Zero-collapse: if the weight, the unit price or the cost sum is zero
/// the result is zero, not the partial product. Use
/// [`purchase_total_amount_exact`] for the true figure.
pub fn purchase_total_amount(
    bought_kgs: Decimal,
    price_per_kg: Decimal,
    total_costs: Decimal,
) -> Decimal {
    if bought_kgs.is_zero() || price_per_kg.is_zero() || total_costs.is_zero() {
        return Decimal::ZERO;
    }
    bought_kgs * price_per_kg + total_costs
}

/// True arithmetic counterpart of [`purchase_total_amount`].
pub fn purchase_total_amount_exact(
    bought_kgs: Decimal,
    price_per_kg: Decimal,
    total_costs: Decimal,
) -> Decimal {
    bought_kgs * price_per_kg + total_costs
}

/// Total money value of a sale: weight x unit price.
///
/// Zero-collapse: a zero factor makes the result zero.
pub fn sale_total_amount(quantity_kgs: Decimal, price_per_kg: Decimal) -> Decimal {
    if quantity_kgs.is_zero() || price_per_kg.is_zero() {
        return Decimal::ZERO;
    }
    quantity_kgs * price_per_kg
}

/// Weight still on hand for a purchase lot after sales and shrinkage.
///
/// Zero-collapse: if the bought weight, the sold sum or the lost sum is
/// zero the result is zero — a lot with no recorded losses therefore
/// reports zero remaining. Kept for parity with the migrated ledgers;
/// [`purchase_remaining_kgs_exact`] gives the true difference.
pub fn purchase_remaining_kgs(
    bought_kgs: Decimal,
    sold_kgs: Decimal,
    lost_kgs: Decimal,
) -> Decimal {
    if bought_kgs.is_zero() || sold_kgs.is_zero() || lost_kgs.is_zero() {
        return Decimal::ZERO;
    }
    bought_kgs - sold_kgs - lost_kgs
}

/// True arithmetic counterpart of [`purchase_remaining_kgs`].
///
/// Can go negative when a lot is oversold relative to its records.
pub fn purchase_remaining_kgs_exact(
    bought_kgs: Decimal,
    sold_kgs: Decimal,
    lost_kgs: Decimal,
) -> Decimal {
    bought_kgs - sold_kgs - lost_kgs
}

/// Percentage of a record's total value settled by its payments.
///
/// Defined as zero when the total is zero, never a division error.
pub fn payment_completion_ratio(amount_paid: Decimal, total_amount: Decimal) -> Decimal {
    if total_amount.is_zero() {
        return Decimal::ZERO;
    }
    amount_paid / total_amount * Decimal::from(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn total_costs_is_plain_sum() {
        let total = purchase_total_costs(dec("10.50"), dec("5.25"), dec("0"), dec("4.25"));
        assert_eq!(total, dec("20.00"));
    }

    #[test]
    fn total_amount_collapses_on_zero_weight() {
        // Legacy behavior: a zero operand zeroes the whole figure.
        // True arithmetic would give 5 (the costs alone).
        assert_eq!(
            purchase_total_amount(Decimal::ZERO, dec("10"), dec("5")),
            Decimal::ZERO
        );
        assert_eq!(
            purchase_total_amount_exact(Decimal::ZERO, dec("10"), dec("5")),
            dec("5")
        );
    }

    #[test]
    fn total_amount_with_all_operands() {
        assert_eq!(
            purchase_total_amount(dec("100"), dec("2.50"), dec("30")),
            dec("280")
        );
    }

    #[test]
    fn remaining_collapses_when_no_losses() {
        // bought 100, sold 30, lost 0: the legacy rule reports 0 on hand.
        assert_eq!(
            purchase_remaining_kgs(dec("100"), dec("30"), Decimal::ZERO),
            Decimal::ZERO
        );
        // Migrators fixing the rule get the true 70.
        assert_eq!(
            purchase_remaining_kgs_exact(dec("100"), dec("30"), Decimal::ZERO),
            dec("70")
        );
    }

    #[test]
    fn ratio_handles_zero_total() {
        assert_eq!(
            payment_completion_ratio(dec("500"), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn ratio_bands() {
        let ratio = payment_completion_ratio(dec("750"), dec("1000"));
        assert_eq!(ratio, dec("75"));
        assert_eq!(PaymentStatus::from_ratio(ratio), PaymentStatus::PartiallyPaid);
    }
}
