//! # Adjustment Note Calculator
//!
//! GST split, rounding and outstanding-balance effect of credit and debit
//! notes.
//!
//! ## Rounding Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Per line                                                               │
//! │    qty  = round2(qty)          rate = round2(rate)                      │
//! │    tax% = round2(tax%)                                                  │
//! │    line_amount = qty × rate                    (NOT rounded)            │
//! │    cgst = sgst = round2(line_amount × (tax%/2) / 100)   [gst]           │
//! │    igst        = round2(line_amount × tax% / 100)       [igst]          │
//! │    total_tax   = round2(cgst + sgst + igst)                             │
//! │                                                                         │
//! │  Aggregate                                                              │
//! │    subtotal    = round2(Σ line_amount)         (sum first, round once) │
//! │    total_cgst  = round2(Σ cgst)   ... same for sgst, igst               │
//! │    total_tax   = round2(total_cgst + total_sgst + total_igst)           │
//! │                                                                         │
//! │  Grand total                                                            │
//! │    grand_total = round_whole(subtotal + total_tax)                      │
//! │    round_off   = round2(grand_total - (subtotal + total_tax))           │
//! │    delta       = credit ? -grand_total : +grand_total                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step above mirrors the backend note function one to one. Do not
//! merge steps.
//!
//! Products and sums saturate at `Decimal::MAX`; no input can panic.

use rust_decimal::Decimal;
use tracing::debug;

use crate::money::{non_negative, round2, round_whole, CalculationPolicy, RoundingMode};
use crate::types::{AdjustmentDirection, CalculationResult, LineItem, LineResult, TaxRegime};

/// Tax components of a single line.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineTaxes {
    cgst: Decimal,
    sgst: Decimal,
    igst: Decimal,
}

/// Splits the tax of one line according to the regime.
fn line_taxes(
    line_amount: Decimal,
    tax_rate_percent: Decimal,
    regime: TaxRegime,
    mode: RoundingMode,
) -> LineTaxes {
    match regime {
        TaxRegime::NoTax => LineTaxes {
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            igst: Decimal::ZERO,
        },
        TaxRegime::Gst => {
            let half_rate = tax_rate_percent / Decimal::TWO;
            LineTaxes {
                cgst: round2(line_amount.saturating_mul(half_rate) / Decimal::ONE_HUNDRED, mode),
                sgst: round2(line_amount.saturating_mul(half_rate) / Decimal::ONE_HUNDRED, mode),
                igst: Decimal::ZERO,
            }
        }
        TaxRegime::Igst => LineTaxes {
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            igst: round2(
                line_amount.saturating_mul(tax_rate_percent) / Decimal::ONE_HUNDRED,
                mode,
            ),
        },
    }
}

/// Computes the figures of a single line.
///
/// Returns `None` when the rounded quantity is not positive; such lines take
/// no part in the note.
pub fn calculate_line(item: &LineItem, regime: TaxRegime, mode: RoundingMode) -> Option<LineResult> {
    let quantity = round2(non_negative(item.quantity), mode);
    if quantity <= Decimal::ZERO {
        return None;
    }

    let rate = round2(non_negative(item.rate), mode);
    let tax_rate_percent = round2(non_negative(item.tax_rate_percent), mode);
    let line_amount = quantity.saturating_mul(rate);

    let taxes = line_taxes(line_amount, tax_rate_percent, regime, mode);
    let total_tax = round2(
        taxes.cgst.saturating_add(taxes.sgst).saturating_add(taxes.igst),
        mode,
    );

    Some(LineResult {
        product_id: item.product_id,
        quantity,
        rate,
        tax_rate_percent,
        line_amount,
        cgst: taxes.cgst,
        sgst: taxes.sgst,
        igst: taxes.igst,
        total_tax,
    })
}

/// Calculates the totals of a credit or debit note.
///
/// ## Arguments
/// * `items` - Selected line items (see [`crate::selection::select_line_items`])
/// * `regime` - Tax regime of the original invoice
/// * `direction` - Credit or debit
/// * `invoice_outstanding` - Current unpaid balance of the invoice
/// * `policy` - Rounding policy shared with the backend
///
/// Never fails. A credit note larger than the outstanding still computes;
/// rejecting it is the review step's job. Arithmetic saturates at
/// `Decimal::MAX` rather than overflowing.
///
/// ## Example
/// ```rust
/// use godown_core::adjustment::calculate_adjustment_totals;
/// use godown_core::money::CalculationPolicy;
/// use godown_core::types::{AdjustmentDirection, LineItem, TaxRegime};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let items = vec![LineItem::new(
///     Uuid::new_v4(),
///     Decimal::new(10, 0),
///     Decimal::new(100, 0),
///     Decimal::new(18, 0),
/// )];
///
/// let result = calculate_adjustment_totals(
///     &items,
///     TaxRegime::Gst,
///     AdjustmentDirection::Credit,
///     Decimal::new(5000, 0),
///     CalculationPolicy::default(),
/// );
///
/// assert_eq!(result.total_cgst, Decimal::new(90, 0));
/// assert_eq!(result.grand_total, Decimal::new(1180, 0));
/// assert_eq!(result.new_outstanding, Decimal::new(3820, 0));
/// ```
pub fn calculate_adjustment_totals(
    items: &[LineItem],
    regime: TaxRegime,
    direction: AdjustmentDirection,
    invoice_outstanding: Decimal,
    policy: CalculationPolicy,
) -> CalculationResult {
    let mode = policy.rounding;

    let line_results: Vec<LineResult> = items
        .iter()
        .filter_map(|item| calculate_line(item, regime, mode))
        .collect();

    let mut raw_subtotal = Decimal::ZERO;
    let mut sum_cgst = Decimal::ZERO;
    let mut sum_sgst = Decimal::ZERO;
    let mut sum_igst = Decimal::ZERO;
    for line in &line_results {
        raw_subtotal = raw_subtotal.saturating_add(line.line_amount);
        sum_cgst = sum_cgst.saturating_add(line.cgst);
        sum_sgst = sum_sgst.saturating_add(line.sgst);
        sum_igst = sum_igst.saturating_add(line.igst);
    }

    let subtotal = round2(raw_subtotal, mode);
    let total_cgst = round2(sum_cgst, mode);
    let total_sgst = round2(sum_sgst, mode);
    let total_igst = round2(sum_igst, mode);
    let total_tax = round2(
        total_cgst.saturating_add(total_sgst).saturating_add(total_igst),
        mode,
    );

    let exact_total = subtotal.saturating_add(total_tax);
    let grand_total = round_whole(exact_total, mode);
    let round_off = round2(grand_total.saturating_sub(exact_total), mode);

    let outstanding_delta = if direction.is_credit() {
        -grand_total
    } else {
        grand_total
    };
    let new_outstanding = round2(invoice_outstanding, mode).saturating_add(outstanding_delta);

    debug!(
        lines = line_results.len(),
        ?regime,
        ?direction,
        %subtotal,
        %total_tax,
        %grand_total,
        %round_off,
        "Calculated adjustment note totals"
    );

    CalculationResult {
        line_results,
        subtotal,
        total_cgst,
        total_sgst,
        total_igst,
        total_tax,
        round_off,
        grand_total,
        outstanding_delta,
        new_outstanding,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
