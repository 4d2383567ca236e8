//! Tests for per-record valuations
//!
//! Covers the cost sum, the legacy zero-collapse rules on total amounts
//! and remaining weight, and the payment-completion ratio with its
//! typed status bands.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    payment_completion_ratio, purchase_remaining_kgs, purchase_remaining_kgs_exact,
    purchase_total_amount, purchase_total_amount_exact, purchase_total_costs, sale_total_amount,
    PaymentStatus,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// =============================================================================
// Cost sum: a true sum of the four cost fields, never collapsed
// =============================================================================

mod total_costs {
    use super::*;

    #[test]
    fn sums_all_four_cost_fields() {
        let total = purchase_total_costs(dec("120.00"), dec("45.50"), dec("10.00"), dec("2.25"));
        assert_eq!(total, dec("177.75"));
    }

    #[test]
    fn zero_fields_do_not_collapse_the_sum() {
        // Unlike the total-amount rule, a zero component is just a zero term.
        let total = purchase_total_costs(dec("50"), Decimal::ZERO, Decimal::ZERO, dec("25"));
        assert_eq!(total, dec("75"));
    }
}

// =============================================================================
// Legacy zero-collapse on purchase / sale total amounts
// =============================================================================

mod total_amount {
    use super::*;

    #[test]
    fn computes_weight_times_price_plus_costs() {
        // 100kg at 2.50 plus 30 in costs
        assert_eq!(
            purchase_total_amount(dec("100"), dec("2.50"), dec("30")),
            dec("280.00")
        );
    }

    #[test]
    fn zero_weight_collapses_to_zero() {
        // Documented legacy behavior: the costs are swallowed, not reported.
        // A corrected formula would return 5 here.
        assert_eq!(
            purchase_total_amount(Decimal::ZERO, dec("10"), dec("5")),
            Decimal::ZERO
        );
    }

    #[test]
    fn zero_costs_collapse_to_zero() {
        // Even a fully-priced lot values at zero when no side costs were
        // recorded. This is the carried-over rule, asserted deliberately.
        assert_eq!(
            purchase_total_amount(dec("100"), dec("10"), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn exact_variant_keeps_the_arithmetic() {
        assert_eq!(
            purchase_total_amount_exact(Decimal::ZERO, dec("10"), dec("5")),
            dec("5")
        );
        assert_eq!(
            purchase_total_amount_exact(dec("100"), dec("10"), Decimal::ZERO),
            dec("1000")
        );
    }

    #[test]
    fn sale_total_is_quantity_times_price() {
        assert_eq!(sale_total_amount(dec("30"), dec("3.20")), dec("96.00"));
    }

    #[test]
    fn sale_total_collapses_on_zero_factor() {
        assert_eq!(sale_total_amount(Decimal::ZERO, dec("3.20")), Decimal::ZERO);
        assert_eq!(sale_total_amount(dec("30"), Decimal::ZERO), Decimal::ZERO);
    }
}

// =============================================================================
// Remaining weight per purchase lot
// =============================================================================

mod remaining_kgs {
    use super::*;

    #[test]
    fn subtracts_sold_and_lost() {
        assert_eq!(
            purchase_remaining_kgs(dec("100"), dec("30"), dec("10")),
            dec("60")
        );
    }

    #[test]
    fn zero_losses_collapse_remaining_to_zero() {
        // bought 100, sold 30, lost 0: the legacy rule reports 0 on hand,
        // not the arithmetic 70. Asserted as documented behavior.
        assert_eq!(
            purchase_remaining_kgs(dec("100"), dec("30"), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn exact_variant_for_migrators() {
        // The corrected formula migrators should cut over to.
        assert_eq!(
            purchase_remaining_kgs_exact(dec("100"), dec("30"), Decimal::ZERO),
            dec("70")
        );
    }

    #[test]
    fn exact_variant_can_go_negative_when_oversold() {
        assert_eq!(
            purchase_remaining_kgs_exact(dec("100"), dec("120"), dec("5")),
            dec("-25")
        );
    }
}

// =============================================================================
// Payment-completion ratio and status bands
// =============================================================================

mod payment_ratio {
    use super::*;

    #[test]
    fn ratio_is_percent_of_total() {
        assert_eq!(payment_completion_ratio(dec("750"), dec("1000")), dec("75"));
    }

    #[test]
    fn zero_total_defines_ratio_as_zero() {
        // Never a division error; a silent defined value.
        assert_eq!(
            payment_completion_ratio(dec("750"), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn bands_at_the_documented_thresholds() {
        assert_eq!(PaymentStatus::from_ratio(dec("100")), PaymentStatus::FullyPaid);
        assert_eq!(PaymentStatus::from_ratio(dec("150")), PaymentStatus::FullyPaid);
        assert_eq!(
            PaymentStatus::from_ratio(dec("99.99")),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            PaymentStatus::from_ratio(dec("50")),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            PaymentStatus::from_ratio(dec("49.99")),
            PaymentStatus::Underpaid
        );
        assert_eq!(
            PaymentStatus::from_ratio(Decimal::ZERO),
            PaymentStatus::Underpaid
        );
    }

    #[test]
    fn partially_paid_example() {
        let ratio = payment_completion_ratio(dec("750"), dec("1000"));
        assert_eq!(PaymentStatus::from_ratio(ratio), PaymentStatus::PartiallyPaid);
    }
}

// =============================================================================
// Property tests
// =============================================================================

/// Decimal amounts in cents up to 10^6
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    /// total_costs equals the sum of its four fields for any amounts
    #[test]
    fn prop_total_costs_is_sum(a in amount(), b in amount(), c in amount(), d in amount()) {
        prop_assert_eq!(purchase_total_costs(a, b, c, d), a + b + c + d);
    }

    /// Any zero operand collapses the purchase total to zero; otherwise
    /// the figure matches the exact arithmetic
    #[test]
    fn prop_total_amount_collapse(kgs in amount(), price in amount(), costs in amount()) {
        let total = purchase_total_amount(kgs, price, costs);
        if kgs.is_zero() || price.is_zero() || costs.is_zero() {
            prop_assert_eq!(total, Decimal::ZERO);
        } else {
            prop_assert_eq!(total, purchase_total_amount_exact(kgs, price, costs));
        }
    }

    /// The ratio never divides by zero and scales linearly
    #[test]
    fn prop_ratio_defined_everywhere(paid in amount(), total in amount()) {
        let ratio = payment_completion_ratio(paid, total);
        if total.is_zero() {
            prop_assert_eq!(ratio, Decimal::ZERO);
        } else {
            prop_assert_eq!(ratio, paid / total * Decimal::from(100));
        }
    }
}
