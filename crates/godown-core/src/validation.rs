//! # Validation Module
//!
//! Business rules the review step enforces before a document is submitted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form fields                                                  │
//! │  └── parse_amount(): blank / negative → 0, never an error              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Review step                                                  │
//! │  └── THIS MODULE: ceilings, credit limit, ledgers                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend RPC                                                  │
//! │  └── Recomputes and stores the authoritative figures                   │
//! │                                                                         │
//! │  The calculators never validate; they stay total so previews can run   │
//! │  on every keystroke.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use godown_core::validation::{validate_credit_within_outstanding, validate_has_lines};
//! use godown_core::types::AdjustmentDirection;
//! use rust_decimal::Decimal;
//!
//! assert!(validate_has_lines(0).is_err());
//! assert!(validate_credit_within_outstanding(
//!     AdjustmentDirection::Credit,
//!     Decimal::new(600, 0),
//!     Decimal::new(500, 0),
//! )
//! .is_err());
//! ```

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::payment::InvoiceAllocation;
use crate::types::AdjustmentDirection;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Adjustment Note Validators
// =============================================================================

/// Validates that a note quantity does not exceed the invoiced quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Credit Note: Select Items                                              │
/// │                                                                         │
/// │  Invoice line: Cotton Roll × 10                                        │
/// │  User enters quantity: 12.5                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity_ceiling("Cotton Roll", 12.5, 10) ← THIS FUNCTION    │
/// │       │                                                                 │
/// │       ├── 12.5 > 10 → Error: "Quantity 12.5 ... exceeds ... 10"         │
/// │       │                                                                 │
/// │       └── OK → quantity flows into the preview                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity_ceiling(
    product: &str,
    requested: Decimal,
    invoiced: Decimal,
) -> ValidationResult<()> {
    if requested > invoiced {
        return Err(ValidationError::QuantityExceedsInvoice {
            product: product.to_string(),
            requested,
            invoiced,
        });
    }

    Ok(())
}

/// Validates that a credit note does not refund more than is owed.
///
/// ## Rules
/// - Credit notes: `grand_total <= outstanding`
/// - Debit notes: always OK (they increase what is owed)
pub fn validate_credit_within_outstanding(
    direction: AdjustmentDirection,
    grand_total: Decimal,
    outstanding: Decimal,
) -> ValidationResult<()> {
    if direction.is_credit() && grand_total > outstanding {
        return Err(ValidationError::CreditExceedsOutstanding {
            grand_total,
            outstanding,
        });
    }

    Ok(())
}

/// Validates that at least one line takes part in the document.
pub fn validate_has_lines(selected: usize) -> ValidationResult<()> {
    if selected == 0 {
        return Err(ValidationError::NoLinesSelected);
    }

    Ok(())
}

/// Validates a GST or TDS percentage.
///
/// ## Rules
/// - Must be between 0 and 100
pub fn validate_tax_rate_percent(field: &str, rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

// =============================================================================
// Payment Validators
// =============================================================================

/// Validates that an allocation does not settle more than the invoice owes.
pub fn validate_allocation_within_outstanding(
    allocation: &InvoiceAllocation,
) -> ValidationResult<()> {
    if allocation.amount > allocation.outstanding {
        return Err(ValidationError::AllocationExceedsOutstanding {
            invoice: allocation.invoice_number.clone(),
            allocated: allocation.amount,
            outstanding: allocation.outstanding,
        });
    }

    Ok(())
}

/// Validates that a ledger the document posts to is configured.
///
/// ## Example
/// ```rust
/// use godown_core::validation::validate_ledger_configured;
/// use uuid::Uuid;
///
/// assert!(validate_ledger_configured("TDS", Some(Uuid::new_v4())).is_ok());
/// assert!(validate_ledger_configured("TDS", None).is_err());
/// ```
pub fn validate_ledger_configured(purpose: &str, ledger_id: Option<Uuid>) -> ValidationResult<Uuid> {
    ledger_id.ok_or_else(|| ValidationError::MissingLedger {
        purpose: purpose.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_ceiling() {
        let ten = Decimal::new(10, 0);
        assert!(validate_quantity_ceiling("Roll", Decimal::new(10, 0), ten).is_ok());
        assert!(validate_quantity_ceiling("Roll", Decimal::new(999, 2), ten).is_ok());
        assert!(validate_quantity_ceiling("Roll", Decimal::new(1001, 2), ten).is_err());
    }

    #[test]
    fn test_validate_credit_within_outstanding() {
        let outstanding = Decimal::new(500, 0);

        assert!(validate_credit_within_outstanding(
            AdjustmentDirection::Credit,
            Decimal::new(500, 0),
            outstanding
        )
        .is_ok());

        let err = validate_credit_within_outstanding(
            AdjustmentDirection::Credit,
            Decimal::new(600, 0),
            outstanding,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::CreditExceedsOutstanding { .. }));

        assert!(validate_credit_within_outstanding(
            AdjustmentDirection::Debit,
            Decimal::new(600, 0),
            outstanding
        )
        .is_ok());
    }

    #[test]
    fn test_validate_has_lines() {
        assert_eq!(validate_has_lines(0), Err(ValidationError::NoLinesSelected));
        assert!(validate_has_lines(3).is_ok());
    }

    #[test]
    fn test_validate_tax_rate_percent() {
        assert!(validate_tax_rate_percent("gst_rate", Decimal::ZERO).is_ok());
        assert!(validate_tax_rate_percent("gst_rate", Decimal::new(18, 0)).is_ok());
        assert!(validate_tax_rate_percent("gst_rate", Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_tax_rate_percent("gst_rate", Decimal::new(10001, 2)).is_err());
        assert!(validate_tax_rate_percent("tds_rate", Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_allocation_within_outstanding() {
        let mut allocation = InvoiceAllocation {
            invoice_id: Uuid::new_v4(),
            invoice_number: "INV-9".to_string(),
            outstanding: Decimal::new(100000, 2),
            amount: Decimal::new(100000, 2),
        };
        assert!(validate_allocation_within_outstanding(&allocation).is_ok());

        allocation.amount = Decimal::new(100001, 2);
        let err = validate_allocation_within_outstanding(&allocation).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Allocation 1000.01 for invoice INV-9 exceeds outstanding 1000.00"
        );
    }

    #[test]
    fn test_validate_ledger_configured() {
        let id = Uuid::new_v4();
        assert_eq!(validate_ledger_configured("TDS", Some(id)), Ok(id));
        assert_eq!(
            validate_ledger_configured("TDS", None),
            Err(ValidationError::MissingLedger {
                purpose: "TDS".to_string()
            })
        );
    }
}
