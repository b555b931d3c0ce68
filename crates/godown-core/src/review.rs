//! # Review Step
//!
//! What the final wizard step runs before it lets the user submit a note or
//! voucher.
//!
//! ## Adjustment Note Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AdjustmentNoteRequest                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. every selection must point at an invoice line                      │
//! │  2. quantity → stock type granularity (roll: 2 dp, others: whole)       │
//! │  3. quantity <= invoiced quantity                                       │
//! │  4. select_line_items() → at least one line                            │
//! │  5. calculate_adjustment_totals()                                       │
//! │  6. credit note: grand_total <= invoice outstanding                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AdjustmentPreview (shown to the user, then sent to the backend RPC)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backend recomputes everything on submit. A preview only has to agree
//! with it.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::adjustment::calculate_adjustment_totals;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{format_inr, format_round_off, non_negative, round2, CalculationPolicy};
use crate::payment::{calculate_payment_net, PaymentAmount};
use crate::selection::{is_included, select_line_items};
use crate::types::{
    AdjustmentDirection, CalculationResult, InvoiceLine, LineSelection, PaymentResult, TaxRegime,
};
use crate::validation::{
    validate_allocation_within_outstanding, validate_credit_within_outstanding,
    validate_has_lines, validate_ledger_configured, validate_quantity_ceiling,
    validate_tax_rate_percent,
};

// =============================================================================
// Adjustment Notes
// =============================================================================

/// Everything the note wizard has collected by the review step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdjustmentNoteRequest {
    pub invoice_number: String,

    #[ts(type = "string")]
    pub invoice_outstanding: Decimal,

    pub regime: TaxRegime,

    pub direction: AdjustmentDirection,

    pub lines: Vec<InvoiceLine>,

    #[ts(as = "HashMap<String, LineSelection>")]
    pub selections: HashMap<Uuid, LineSelection>,
}

/// Figures shown on the review step of a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdjustmentPreview {
    pub result: CalculationResult,

    /// `None` when the round-off is zero and the line is hidden.
    pub round_off_display: Option<String>,

    pub grand_total_display: String,
}

/// Validates and previews a credit or debit note.
///
/// ## Errors
/// - [`CoreError::UnknownInvoiceLine`] for a selection not on the invoice
/// - [`ValidationError::QuantityExceedsInvoice`] for quantities above the invoice
/// - [`ValidationError::NoLinesSelected`] when nothing takes part
/// - [`ValidationError::CreditExceedsOutstanding`] for oversize credit notes
pub fn prepare_adjustment_note(
    request: &AdjustmentNoteRequest,
    policy: CalculationPolicy,
) -> CoreResult<AdjustmentPreview> {
    let mode = policy.rounding;

    // Smallest unknown id first; map iteration order is unstable.
    let stray = request
        .selections
        .iter()
        .filter(|(product_id, selection)| {
            is_included(selection) && !request.lines.iter().any(|l| &l.product_id == *product_id)
        })
        .map(|(product_id, _)| *product_id)
        .min();
    if let Some(product_id) = stray {
        return Err(CoreError::UnknownInvoiceLine {
            invoice: request.invoice_number.clone(),
            product_id,
        });
    }

    let mut normalized: HashMap<Uuid, LineSelection> = HashMap::new();
    for line in &request.lines {
        let Some(selection) = request.selections.get(&line.product_id) else {
            continue;
        };

        let quantity = line
            .stock_type
            .normalize_quantity(non_negative(selection.quantity), mode);
        let selection = LineSelection {
            selected: selection.selected,
            quantity,
            rate: selection.rate,
        };

        if is_included(&selection) {
            validate_quantity_ceiling(&line.product_name, quantity, line.quantity)?;
            validate_tax_rate_percent("gst_rate", line.tax_rate_percent)?;
        }
        normalized.insert(line.product_id, selection);
    }

    let items = select_line_items(&request.lines, &normalized);
    validate_has_lines(items.len())?;

    let result = calculate_adjustment_totals(
        &items,
        request.regime,
        request.direction,
        request.invoice_outstanding,
        policy,
    );

    let outstanding = round2(request.invoice_outstanding, mode);
    if let Err(err) =
        validate_credit_within_outstanding(request.direction, result.grand_total, outstanding)
    {
        warn!(
            invoice = %request.invoice_number,
            grand_total = %result.grand_total,
            %outstanding,
            "Credit note blocked"
        );
        return Err(err.into());
    }

    debug!(
        invoice = %request.invoice_number,
        lines = result.line_results.len(),
        grand_total = %result.grand_total,
        "Prepared adjustment note preview"
    );

    Ok(AdjustmentPreview {
        round_off_display: format_round_off(result.round_off),
        grand_total_display: format_inr(result.grand_total),
        result,
    })
}

// =============================================================================
// Payments & Receipts
// =============================================================================

/// Everything the payment wizard has collected by the review step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentRequest {
    pub amount: PaymentAmount,

    pub tds_applicable: bool,

    #[ts(type = "string")]
    pub tds_rate_percent: Decimal,

    /// Ledger of the party being paid or received from.
    #[ts(as = "Option<String>")]
    pub party_ledger_id: Option<Uuid>,

    /// Ledger TDS is booked to. Required only when TDS applies.
    #[ts(as = "Option<String>")]
    pub tds_ledger_id: Option<Uuid>,
}

/// Figures shown on the review step of a voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentPreview {
    pub result: PaymentResult,

    pub net_amount_display: String,
}

/// Validates and previews a payment or receipt voucher.
///
/// ## Errors
/// - [`ValidationError::MissingLedger`] for the party, or TDS when it applies
/// - [`ValidationError::AllocationExceedsOutstanding`] for oversize allocations
/// - [`ValidationError::OutOfRange`] for a TDS rate outside 0..=100
/// - [`ValidationError::Required`] when the voucher total rounds to zero
pub fn prepare_payment(
    request: &PaymentRequest,
    policy: CalculationPolicy,
) -> CoreResult<PaymentPreview> {
    validate_ledger_configured("Party", request.party_ledger_id)?;

    if let PaymentAmount::Allocations { allocations } = &request.amount {
        validate_has_lines(allocations.len())?;
        for allocation in allocations {
            validate_allocation_within_outstanding(allocation)?;
        }
    }

    if request.tds_applicable {
        validate_tax_rate_percent("tds_rate", request.tds_rate_percent)?;
        validate_ledger_configured("TDS", request.tds_ledger_id)?;
    }

    let total = request.amount.total();
    if round2(total, policy.rounding).is_zero() {
        return Err(ValidationError::Required {
            field: "amount".to_string(),
        }
        .into());
    }

    let result = calculate_payment_net(
        total,
        request.tds_rate_percent,
        request.tds_applicable,
        policy,
    );

    Ok(PaymentPreview {
        net_amount_display: format_inr(result.net_amount),
        result,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
