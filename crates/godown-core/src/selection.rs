//! # Line Selection
//!
//! Turns the review step's per-product selection map into the line items a
//! calculator sees.
//!
//! ```text
//! invoice lines (ordered)      selections (by product id)
//!   ├── A  qty 10 @ 100   ───►  A: selected, qty 4       ──► LineItem A (4 @ 100)
//!   ├── B  qty 2  @ 50    ───►  B: not selected          ──► (skipped)
//!   └── C  qty 1  @ 900   ───►  C: selected, qty 0       ──► (skipped)
//! ```
//!
//! Skipped lines are not an error; they simply take no part in the totals.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::trace;
use uuid::Uuid;

use crate::types::{InvoiceLine, LineItem, LineSelection};

/// Whether a selection takes part in a calculation.
#[inline]
pub fn is_included(selection: &LineSelection) -> bool {
    selection.selected && selection.quantity > Decimal::ZERO
}

/// Builds the calculator input from invoice lines and the selection map.
///
/// Invoice order is preserved. The selected rate overrides the invoiced rate
/// when present; the tax slab always comes from the invoice line.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use godown_core::selection::select_line_items;
/// use godown_core::types::{InvoiceLine, LineSelection, StockType};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let id = Uuid::new_v4();
/// let lines = vec![InvoiceLine {
///     product_id: id,
///     product_name: "Cotton Roll".into(),
///     stock_type: StockType::Roll,
///     quantity: Decimal::new(10, 0),
///     rate: Decimal::new(100, 0),
///     tax_rate_percent: Decimal::new(5, 0),
/// }];
/// let mut selections = HashMap::new();
/// selections.insert(id, LineSelection { selected: true, quantity: Decimal::new(4, 0), rate: None });
///
/// let items = select_line_items(&lines, &selections);
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].rate, Decimal::new(100, 0));
/// ```
pub fn select_line_items(
    lines: &[InvoiceLine],
    selections: &HashMap<Uuid, LineSelection>,
) -> Vec<LineItem> {
    let items: Vec<LineItem> = lines
        .iter()
        .filter_map(|line| {
            let selection = selections.get(&line.product_id)?;
            if !is_included(selection) {
                return None;
            }

            Some(LineItem::new(
                line.product_id,
                selection.quantity,
                selection.rate.unwrap_or(line.rate),
                line.tax_rate_percent,
            ))
        })
        .collect();

    trace!(
        invoice_lines = lines.len(),
        selected = items.len(),
        "Selected line items"
    );

    items
}

// =============================================================================
// Unit Tests
// =============================================================================
