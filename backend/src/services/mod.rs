//! Business logic services for the AgriTrade Management Platform

use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub mod buyer;
pub mod loss;
pub mod payment;
pub mod product_type;
pub mod purchase;
pub mod reporting;
pub mod sale;
pub mod supplier;

pub use buyer::BuyerService;
pub use loss::LossService;
pub use payment::PaymentService;
pub use product_type::ProductTypeService;
pub use purchase::PurchaseService;
pub use reporting::ReportingService;
pub use sale::SaleService;
pub use supplier::SupplierService;

/// Protect-on-delete: a parent row with live children cannot be removed.
pub fn ensure_no_children(
    entity: &'static str,
    id: Uuid,
    child_entity: &'static str,
    child_count: i64,
) -> AppResult<()> {
    if child_count > 0 {
        return Err(AppError::ReferentialIntegrity {
            entity,
            id,
            child_entity,
            child_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_is_blocked_while_children_reference_the_row() {
        let supplier_id = Uuid::new_v4();
        let err = ensure_no_children("Supplier", supplier_id, "Purchase", 3).unwrap_err();
        match err {
            AppError::ReferentialIntegrity {
                entity,
                id,
                child_entity,
                child_count,
            } => {
                assert_eq!(entity, "Supplier");
                assert_eq!(id, supplier_id);
                assert_eq!(child_entity, "Purchase");
                assert_eq!(child_count, 3);
            }
            other => panic!("expected referential integrity error, got {other:?}"),
        }
    }

    #[test]
    fn delete_is_allowed_once_no_children_remain() {
        assert!(ensure_no_children("Supplier", Uuid::new_v4(), "Purchase", 0).is_ok());
        assert!(ensure_no_children("Buyer", Uuid::new_v4(), "Sale", 0).is_ok());
    }
}
