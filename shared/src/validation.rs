//! Field validations for ledger records
//!
//! Pure checks used by the entity store before any write is committed.

use rust_decimal::Decimal;

use crate::models::PaymentType;

/// Required text fields must contain something beyond whitespace.
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

/// Money and weight amounts are never negative.
pub fn validate_non_negative(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// A payment settles exactly one record, and it must match the side of
/// the ledger the payment type names.
pub fn validate_payment_target(
    payment_type: PaymentType,
    has_purchase: bool,
    has_sale: bool,
) -> Result<(), &'static str> {
    match (payment_type, has_purchase, has_sale) {
        (PaymentType::Purchase, true, false) => Ok(()),
        (PaymentType::Sale, false, true) => Ok(()),
        (_, true, true) => Err("Payment cannot reference both a purchase and a sale"),
        (_, false, false) => Err("Payment must reference a purchase or a sale"),
        (PaymentType::Purchase, false, true) => {
            Err("Purchase payment must reference a purchase, not a sale")
        }
        (PaymentType::Sale, true, false) => {
            Err("Sale payment must reference a sale, not a purchase")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert!(validate_required_text("Nakuru Depot").is_ok());
        assert!(validate_required_text("").is_err());
        assert!(validate_required_text("   ").is_err());
    }

    #[test]
    fn non_negative_boundary() {
        assert!(validate_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_non_negative(Decimal::from(-1)).is_err());
    }

    #[test]
    fn payment_target_pairing() {
        assert!(validate_payment_target(PaymentType::Purchase, true, false).is_ok());
        assert!(validate_payment_target(PaymentType::Sale, false, true).is_ok());
        // both targets, or neither, is never valid
        assert!(validate_payment_target(PaymentType::Purchase, true, true).is_err());
        assert!(validate_payment_target(PaymentType::Sale, false, false).is_err());
        // target on the wrong side of the ledger
        assert!(validate_payment_target(PaymentType::Purchase, false, true).is_err());
        assert!(validate_payment_target(PaymentType::Sale, true, false).is_err());
    }
}
