//! # Error Types
//!
//! Domain-specific error types for godown-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  godown-core errors (this file)                                        │
//! │  ├── CoreError        - Review step failures (wraps validation)        │
//! │  └── ValidationError  - Business rules that block submission           │
//! │                                                                         │
//! │  parity-check errors (separate crate)                                  │
//! │  └── ParityError      - Config and fixture failures                    │
//! │                                                                         │
//! │  The calculators themselves never fail: they coerce bad input to zero. │
//! │  Only the review layer returns these errors.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Core Error
// =============================================================================

/// Failures of the review step.
///
/// Each variant maps to a message shown to the user before submission is
/// blocked.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A selection refers to a product that is not on the invoice.
    ///
    /// ## When This Occurs
    /// - The invoice was edited after the note wizard loaded it
    /// - A stale selection map was restored from a draft
    #[error("Product {product_id} is not on invoice {invoice}")]
    UnknownInvoiceLine { invoice: String, product_id: Uuid },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors on the review step.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field or reference is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// Nothing was selected for the document.
    #[error("Select at least one item")]
    NoLinesSelected,

    /// A note quantity is larger than the invoiced quantity.
    #[error("Quantity {requested} for {product} exceeds invoiced quantity {invoiced}")]
    QuantityExceedsInvoice {
        product: String,
        requested: Decimal,
        invoiced: Decimal,
    },

    /// A payment allocation is larger than the invoice's outstanding.
    #[error("Allocation {allocated} for invoice {invoice} exceeds outstanding {outstanding}")]
    AllocationExceedsOutstanding {
        invoice: String,
        allocated: Decimal,
        outstanding: Decimal,
    },

    /// A credit note would refund more than the invoice still owes.
    ///
    /// ## User Workflow
    /// ```text
    /// Invoice outstanding: ₹500
    ///      │
    ///      ▼
    /// Credit note grand total: ₹600
    ///      │
    ///      ▼
    /// CreditExceedsOutstanding { grand_total: 600, outstanding: 500 }
    ///      │
    ///      ▼
    /// UI shows the message, Submit stays disabled
    /// ```
    #[error("Credit note total {grand_total} exceeds invoice outstanding {outstanding}")]
    CreditExceedsOutstanding {
        grand_total: Decimal,
        outstanding: Decimal,
    },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// A ledger the document posts to has not been configured.
    #[error("{purpose} ledger is not configured")]
    MissingLedger { purpose: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::CreditExceedsOutstanding {
            grand_total: Decimal::new(600, 0),
            outstanding: Decimal::new(50000, 2),
        };
        assert_eq!(
            err.to_string(),
            "Credit note total 600 exceeds invoice outstanding 500.00"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::QuantityExceedsInvoice {
            product: "Cotton Roll".to_string(),
            requested: Decimal::new(1250, 2),
            invoiced: Decimal::new(10, 0),
        };
        assert_eq!(
            err.to_string(),
            "Quantity 12.50 for Cotton Roll exceeds invoiced quantity 10"
        );

        let err = ValidationError::MissingLedger {
            purpose: "TDS".to_string(),
        };
        assert_eq!(err.to_string(), "TDS ledger is not configured");
    }

    #[test]
    fn test_unknown_line_message() {
        let err = CoreError::UnknownInvoiceLine {
            invoice: "INV-42".to_string(),
            product_id: Uuid::nil(),
        };
        assert_eq!(
            err.to_string(),
            "Product 00000000-0000-0000-0000-000000000000 is not on invoice INV-42"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NoLinesSelected.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
