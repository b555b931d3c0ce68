//! # Domain Types
//!
//! Inputs and results of the financial calculators.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InvoiceLine    │   │  LineSelection  │   │   LineItem      │       │
//! │  │  ─────────────  │ + │  ─────────────  │ → │  ─────────────  │       │
//! │  │  product_id     │   │  selected       │   │  product_id     │       │
//! │  │  quantity (max) │   │  quantity       │   │  quantity       │       │
//! │  │  rate, gst %    │   │  rate (opt)     │   │  rate, tax %    │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │                           TaxRegime + Direction       ▼                 │
//! │                                              ┌─────────────────┐        │
//! │                                              │CalculationResult│        │
//! │                                              │ lines, totals,  │        │
//! │                                              │ round_off, Δ    │        │
//! │                                              └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types are ephemeral values. Persistence belongs to the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::{round_to, RoundingMode};

// =============================================================================
// Tax Regime
// =============================================================================

/// How GST applies to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// No tax on any line, whatever rate the line carries.
    #[default]
    NoTax,
    /// Intra-state: the rate splits evenly into CGST + SGST.
    Gst,
    /// Inter-state: the full rate applies as IGST.
    Igst,
}

// =============================================================================
// Adjustment Direction
// =============================================================================

/// Whether a note reduces or increases what the counterparty owes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    /// Credit note: subtracts from outstanding.
    Credit,
    /// Debit note: adds to outstanding.
    Debit,
}

impl AdjustmentDirection {
    /// Returns true for credit notes.
    #[inline]
    pub const fn is_credit(&self) -> bool {
        matches!(self, AdjustmentDirection::Credit)
    }
}

// =============================================================================
// Stock Type
// =============================================================================

/// Measurement granularity of a product's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockType {
    /// Roll goods measured in fractional lengths (2 dp quantities).
    Roll,
    /// Batches counted in whole units.
    Batch,
    /// Individual pieces counted in whole units.
    #[default]
    Piece,
}

impl StockType {
    /// Number of decimal places a quantity of this stock type keeps.
    #[inline]
    pub const fn quantity_scale(&self) -> u32 {
        match self {
            StockType::Roll => 2,
            StockType::Batch | StockType::Piece => 0,
        }
    }

    /// Rounds a quantity to this stock type's granularity.
    ///
    /// ## Example
    /// ```rust
    /// use godown_core::types::StockType;
    /// use godown_core::money::RoundingMode;
    /// use rust_decimal::Decimal;
    ///
    /// let qty = Decimal::new(2456, 3); // 2.456
    /// let mode = RoundingMode::HalfAwayFromZero;
    /// assert_eq!(StockType::Roll.normalize_quantity(qty, mode), Decimal::new(246, 2));
    /// assert_eq!(StockType::Piece.normalize_quantity(qty, mode), Decimal::new(2, 0));
    /// ```
    pub fn normalize_quantity(&self, quantity: Decimal, mode: RoundingMode) -> Decimal {
        round_to(quantity, self.quantity_scale(), mode)
    }
}

// =============================================================================
// Invoice Line & Selection
// =============================================================================

/// A line of the invoice a note is raised against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLine {
    #[ts(as = "String")]
    pub product_id: Uuid,

    /// Display name, carried through for validation messages.
    pub product_name: String,

    pub stock_type: StockType,

    /// Invoiced quantity; the ceiling for any note quantity.
    #[ts(type = "string")]
    pub quantity: Decimal,

    /// Invoiced unit rate.
    #[ts(type = "string")]
    pub rate: Decimal,

    /// GST slab of the line (5, 12, 18, ...). Absent slabs come in as 0.
    #[ts(type = "string")]
    pub tax_rate_percent: Decimal,
}

/// What the user picked for one invoice line on the review step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineSelection {
    pub selected: bool,

    #[ts(type = "string")]
    pub quantity: Decimal,

    /// Overridden rate. `None` keeps the invoiced rate.
    #[ts(type = "string | null")]
    pub rate: Option<Decimal>,
}

// =============================================================================
// Line Item
// =============================================================================

/// One line entering a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    #[ts(as = "String")]
    pub product_id: Uuid,

    #[ts(type = "string")]
    pub quantity: Decimal,

    #[ts(type = "string")]
    pub rate: Decimal,

    #[ts(type = "string")]
    pub tax_rate_percent: Decimal,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(product_id: Uuid, quantity: Decimal, rate: Decimal, tax_rate_percent: Decimal) -> Self {
        LineItem {
            product_id,
            quantity,
            rate,
            tax_rate_percent,
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Per-line figures of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineResult {
    #[ts(as = "String")]
    pub product_id: Uuid,

    /// Quantity after rounding.
    #[ts(type = "string")]
    pub quantity: Decimal,

    /// Rate after rounding.
    #[ts(type = "string")]
    pub rate: Decimal,

    /// Tax slab after rounding.
    #[ts(type = "string")]
    pub tax_rate_percent: Decimal,

    /// `quantity × rate`, deliberately unrounded.
    #[ts(type = "string")]
    pub line_amount: Decimal,

    #[ts(type = "string")]
    pub cgst: Decimal,

    #[ts(type = "string")]
    pub sgst: Decimal,

    #[ts(type = "string")]
    pub igst: Decimal,

    #[ts(type = "string")]
    pub total_tax: Decimal,
}

/// Totals of an adjustment note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationResult {
    pub line_results: Vec<LineResult>,

    #[ts(type = "string")]
    pub subtotal: Decimal,

    #[ts(type = "string")]
    pub total_cgst: Decimal,

    #[ts(type = "string")]
    pub total_sgst: Decimal,

    #[ts(type = "string")]
    pub total_igst: Decimal,

    #[ts(type = "string")]
    pub total_tax: Decimal,

    /// Signed correction from `subtotal + total_tax` to `grand_total`.
    #[ts(type = "string")]
    pub round_off: Decimal,

    /// Always a whole number of rupees.
    #[ts(type = "string")]
    pub grand_total: Decimal,

    /// `-grand_total` for credit notes, `+grand_total` for debit notes.
    #[ts(type = "string")]
    pub outstanding_delta: Decimal,

    /// `invoice_outstanding + outstanding_delta`.
    #[ts(type = "string")]
    pub new_outstanding: Decimal,
}

/// Figures of a payment or receipt voucher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentResult {
    #[ts(type = "string")]
    pub total_amount: Decimal,

    #[ts(type = "string")]
    pub tds_amount: Decimal,

    /// Keeps 2 dp; vouchers are never rounded to whole rupees.
    #[ts(type = "string")]
    pub net_amount: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================
