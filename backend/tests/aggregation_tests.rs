//! Tests for cross-entity rollups
//!
//! Covers supplier/buyer value totals, outstanding balances and the
//! product-type net inventory, which is a raw sum and must never apply
//! the per-lot zero-collapse rule.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    net_inventory, outstanding_balance, payments_total, total_purchased_value, total_sales_value,
    PurchaseFigures, SaleFigures,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// =============================================================================
// Supplier / buyer value rollups
// =============================================================================

mod value_rollups {
    use super::*;

    #[test]
    fn purchased_value_sums_lot_totals_with_costs() {
        let purchases = [
            // 100 x 2 + 50 = 250
            PurchaseFigures {
                bought_kgs: dec("100"),
                price_per_kg: dec("2"),
                total_costs: dec("50"),
            },
            // 200 x 3 + 150 = 750
            PurchaseFigures {
                bought_kgs: dec("200"),
                price_per_kg: dec("3"),
                total_costs: dec("150"),
            },
        ];
        assert_eq!(total_purchased_value(&purchases), dec("1000"));
    }

    #[test]
    fn purchased_value_honors_per_lot_collapse() {
        // The second lot has no recorded costs and values at zero under
        // the legacy per-lot rule; only the first contributes.
        let purchases = [
            PurchaseFigures {
                bought_kgs: dec("100"),
                price_per_kg: dec("2"),
                total_costs: dec("50"),
            },
            PurchaseFigures {
                bought_kgs: dec("500"),
                price_per_kg: dec("4"),
                total_costs: Decimal::ZERO,
            },
        ];
        assert_eq!(total_purchased_value(&purchases), dec("250"));
    }

    #[test]
    fn sales_value_sums_sale_totals() {
        let sales = [
            SaleFigures {
                quantity_kgs: dec("20"),
                price_per_kg: dec("5"),
            },
            SaleFigures {
                quantity_kgs: dec("30"),
                price_per_kg: dec("4"),
            },
        ];
        assert_eq!(total_sales_value(&sales), dec("220"));
    }
}

// =============================================================================
// Outstanding balances
// =============================================================================

mod balances {
    use super::*;

    #[test]
    fn positive_balance_when_underpaid() {
        // Value 1000, paid 400: the counterparty is still owed 600.
        let paid = payments_total(&[dec("250"), dec("150")]);
        assert_eq!(outstanding_balance(dec("1000"), paid), dec("600"));
    }

    #[test]
    fn zero_balance_when_settled() {
        let paid = payments_total(&[dec("1000")]);
        assert_eq!(outstanding_balance(dec("1000"), paid), Decimal::ZERO);
    }

    #[test]
    fn negative_balance_when_overpaid() {
        let paid = payments_total(&[dec("600"), dec("600")]);
        assert_eq!(outstanding_balance(dec("1000"), paid), dec("-200"));
    }

    #[test]
    fn no_payments_means_full_value_outstanding() {
        assert_eq!(
            outstanding_balance(dec("1000"), payments_total(&[])),
            dec("1000")
        );
    }
}

// =============================================================================
// Product-type net inventory: raw sums, no collapse
// =============================================================================

mod net_inventory_rollup {
    use super::*;

    #[test]
    fn raw_sums_across_lots() {
        // purchases {100, 50}, sales {20}, losses {5} = 125 exactly
        let bought = [dec("100"), dec("50")];
        let sold = [dec("20")];
        let lost = [dec("5")];
        assert_eq!(net_inventory(&bought, &sold, &lost), dec("125"));
    }

    #[test]
    fn no_collapse_with_zero_loss_sum() {
        // A per-lot remaining computation would collapse each lot to
        // zero here; the type-level aggregate must not.
        let bought = [dec("100"), dec("50")];
        let sold = [dec("30")];
        assert_eq!(net_inventory(&bought, &sold, &[]), dec("120"));
    }

    #[test]
    fn can_go_negative_when_records_disagree() {
        let bought = [dec("10")];
        let sold = [dec("15")];
        let lost = [dec("2")];
        assert_eq!(net_inventory(&bought, &sold, &lost), dec("-7"));
    }
}

// =============================================================================
// Property tests
// =============================================================================

/// Decimal weights in hundredths of a kg
fn weight() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

proptest! {
    /// Net inventory equals the difference of the three raw sums
    #[test]
    fn prop_net_inventory_is_raw_difference(
        bought in prop::collection::vec(weight(), 0..20),
        sold in prop::collection::vec(weight(), 0..20),
        lost in prop::collection::vec(weight(), 0..20),
    ) {
        let bought_sum: Decimal = bought.iter().copied().sum();
        let sold_sum: Decimal = sold.iter().copied().sum();
        let lost_sum: Decimal = lost.iter().copied().sum();
        prop_assert_eq!(
            net_inventory(&bought, &sold, &lost),
            bought_sum - sold_sum - lost_sum
        );
    }

    /// Payments total is order-independent
    #[test]
    fn prop_payments_total_commutative(amounts in prop::collection::vec(weight(), 0..20)) {
        let mut reversed = amounts.clone();
        reversed.reverse();
        prop_assert_eq!(payments_total(&amounts), payments_total(&reversed));
    }
}
