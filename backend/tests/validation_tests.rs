//! Tests for ledger field validations
//!
//! Covers required text, non-negative amounts and the payment
//! type/target pairing rule enforced before any write.

use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{
    validate_non_negative, validate_payment_target, validate_required_text, PaymentType,
};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// =============================================================================
// Field-level invariants
// =============================================================================

mod fields {
    use super::*;

    #[test]
    fn names_and_reasons_must_be_present() {
        assert!(validate_required_text("Kibwezi Growers").is_ok());
        assert!(validate_required_text("").is_err());
        assert!(validate_required_text("  \t ").is_err());
    }

    #[test]
    fn amounts_may_be_zero_but_not_negative() {
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(dec("0.01")).is_ok());
        assert!(validate_non_negative(dec("-0.01")).is_err());
        assert!(validate_non_negative(dec("-500")).is_err());
    }
}

// =============================================================================
// Payment type/target pairing
// =============================================================================

mod payment_pairing {
    use super::*;

    #[test]
    fn purchase_payment_targets_a_purchase() {
        assert!(validate_payment_target(PaymentType::Purchase, true, false).is_ok());
    }

    #[test]
    fn sale_payment_targets_a_sale() {
        assert!(validate_payment_target(PaymentType::Sale, false, true).is_ok());
    }

    #[test]
    fn both_targets_rejected() {
        assert!(validate_payment_target(PaymentType::Purchase, true, true).is_err());
        assert!(validate_payment_target(PaymentType::Sale, true, true).is_err());
    }

    #[test]
    fn no_target_rejected() {
        assert!(validate_payment_target(PaymentType::Purchase, false, false).is_err());
        assert!(validate_payment_target(PaymentType::Sale, false, false).is_err());
    }

    #[test]
    fn mismatched_side_rejected() {
        assert!(validate_payment_target(PaymentType::Purchase, false, true).is_err());
        assert!(validate_payment_target(PaymentType::Sale, true, false).is_err());
    }

    #[test]
    fn type_strings_match_stored_values() {
        assert_eq!(PaymentType::Purchase.as_str(), "PURCHASE");
        assert_eq!(PaymentType::Sale.as_str(), "SALE");
    }
}
