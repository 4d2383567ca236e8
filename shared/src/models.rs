//! Domain value types for the AgriTrade ledger

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side of the ledger a payment settles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Money paid out to a supplier against a purchase
    Purchase,
    /// Money received from a buyer against a sale
    Sale,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Purchase => "PURCHASE",
            PaymentType::Sale => "SALE",
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = &'static str;

    /// Parse the stored text form back into the enum
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PURCHASE" => Ok(PaymentType::Purchase),
            "SALE" => Ok(PaymentType::Sale),
            _ => Err("unknown payment type"),
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed payment-completion band derived from the completion ratio.
///
/// The 100 / 50 thresholds are business-meaningful cutoffs; presentation
/// layers map them to colors but the band itself is part of the model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    FullyPaid,
    PartiallyPaid,
    Underpaid,
}

impl PaymentStatus {
    /// Classify a completion ratio (percent) into its band.
    ///
    /// >= 100 is fully paid, [50, 100) partially paid, below 50 underpaid.
    pub fn from_ratio(ratio: rust_decimal::Decimal) -> Self {
        let hundred = rust_decimal::Decimal::from(100);
        let fifty = rust_decimal::Decimal::from(50);
        if ratio >= hundred {
            PaymentStatus::FullyPaid
        } else if ratio >= fifty {
            PaymentStatus::PartiallyPaid
        } else {
            PaymentStatus::Underpaid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::FullyPaid => "fully_paid",
            PaymentStatus::PartiallyPaid => "partially_paid",
            PaymentStatus::Underpaid => "underpaid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::FullyPaid => write!(f, "Fully Paid"),
            PaymentStatus::PartiallyPaid => write!(f, "Partially Paid"),
            PaymentStatus::Underpaid => write!(f, "Underpaid"),
        }
    }
}

/// Reference to the record a payment-status query is asked about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PaymentTargetRef {
    Purchase(Uuid),
    Sale(Uuid),
}

impl PaymentTargetRef {
    pub fn id(&self) -> Uuid {
        match self {
            PaymentTargetRef::Purchase(id) | PaymentTargetRef::Sale(id) => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    #[test]
    fn payment_type_round_trips_through_stored_text() {
        for payment_type in [PaymentType::Purchase, PaymentType::Sale] {
            assert_eq!(payment_type.as_str().parse(), Ok(payment_type));
        }
    }

    #[test]
    fn payment_type_rejects_unknown_text() {
        assert!("REFUND".parse::<PaymentType>().is_err());
        assert!("purchase".parse::<PaymentType>().is_err());
        assert!("".parse::<PaymentType>().is_err());
    }

    #[test]
    fn banding_at_the_thresholds() {
        assert_eq!(
            PaymentStatus::from_ratio(Decimal::from(100)),
            PaymentStatus::FullyPaid
        );
        assert_eq!(
            PaymentStatus::from_ratio(Decimal::new(9999, 2)),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            PaymentStatus::from_ratio(Decimal::from(50)),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            PaymentStatus::from_ratio(Decimal::new(4999, 2)),
            PaymentStatus::Underpaid
        );
    }

    proptest! {
        #[test]
        fn banding_never_improves_as_the_ratio_drops(
            a in -100_000_000i64..100_000_000,
            b in -100_000_000i64..100_000_000,
        ) {
            let rank = |status: PaymentStatus| match status {
                PaymentStatus::Underpaid => 0,
                PaymentStatus::PartiallyPaid => 1,
                PaymentStatus::FullyPaid => 2,
            };
            let lower = PaymentStatus::from_ratio(Decimal::new(a.min(b), 2));
            let higher = PaymentStatus::from_ratio(Decimal::new(a.max(b), 2));
            prop_assert!(rank(lower) <= rank(higher));
        }
    }
}
