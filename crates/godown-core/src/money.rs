//! # Money Module
//!
//! Rounding primitives, boundary coercion and display formatting for
//! monetary values.
//!
//! ## Why Round at Every Step?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE LEDGER PARITY PROBLEM                                              │
//! │                                                                         │
//! │  The backend SQL functions compute every note and voucher with          │
//! │  numeric arithmetic and round after each intermediate step.             │
//! │                                                                         │
//! │  Rounding once at the end instead:                                      │
//! │    cgst(3 × 33.33 @ 6%) summed over lines ≠ Σ round(cgst per line)      │
//! │    → previews drift from the stored ledger by a paisa or two  ❌        │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal + round2() at the exact same points         │
//! │  the backend rounds, with the same midpoint rule.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use godown_core::money::{parse_amount, round2, RoundingMode};
//! use rust_decimal::Decimal;
//!
//! let rate = parse_amount("33.335");
//! assert_eq!(round2(rate, RoundingMode::HalfAwayFromZero), Decimal::new(3334, 2));
//!
//! // Blank and negative input coerce to zero, never an error
//! assert_eq!(parse_amount(""), Decimal::ZERO);
//! assert_eq!(parse_amount("-5"), Decimal::ZERO);
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Symbol used by the display helpers.
pub const RUPEE_SYMBOL: &str = "₹";

// =============================================================================
// Rounding Mode
// =============================================================================

/// Midpoint rule used by every rounding step of a calculation.
///
/// ## Rounding Modes Explained
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  HALF AWAY FROM ZERO (PostgreSQL numeric round)                     │
/// │    0.125 → 0.13,  0.135 → 0.14,  -0.125 → -0.13                    │
/// │                                                                     │
/// │  HALF EVEN (Bankers Rounding)                                       │
/// │    0.125 → 0.12,  0.135 → 0.14,  -0.125 → -0.12                    │
/// │                                                                     │
/// │  Both agree everywhere except exact midpoints.                      │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Matches `round(numeric, n)` in PostgreSQL.
    #[default]
    HalfAwayFromZero,
    /// Round half to even.
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::HalfAwayFromZero => write!(f, "half_away_from_zero"),
            RoundingMode::HalfEven => write!(f, "half_even"),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "half_away_from_zero" | "half_up" => Ok(RoundingMode::HalfAwayFromZero),
            "half_even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(format!("Invalid rounding mode: {}", other)),
        }
    }
}

// =============================================================================
// Calculation Policy
// =============================================================================

/// Explicit knobs for a calculation.
///
/// Passed by value into every calculator so that no calculation ever reads
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationPolicy {
    /// Midpoint rule for both 2 dp and whole-unit rounding.
    pub rounding: RoundingMode,
}

impl CalculationPolicy {
    /// Creates a policy with the given rounding mode.
    pub const fn new(rounding: RoundingMode) -> Self {
        CalculationPolicy { rounding }
    }
}

// =============================================================================
// Rounding Primitives
// =============================================================================

/// Rounds to `dp` decimal places with the given midpoint rule.
#[inline]
pub fn round_to(x: Decimal, dp: u32, mode: RoundingMode) -> Decimal {
    x.round_dp_with_strategy(dp, mode.strategy())
}

/// Rounds to exactly 2 decimal places.
///
/// Applied after every intermediate monetary computation, never just at the
/// end.
///
/// ## Example
/// ```rust
/// use godown_core::money::{round2, RoundingMode};
/// use rust_decimal::Decimal;
///
/// let x = Decimal::new(12345, 3); // 12.345
/// assert_eq!(round2(x, RoundingMode::HalfAwayFromZero), Decimal::new(1235, 2));
/// assert_eq!(round2(x, RoundingMode::HalfEven), Decimal::new(1234, 2));
/// ```
#[inline]
pub fn round2(x: Decimal, mode: RoundingMode) -> Decimal {
    round_to(x, 2, mode)
}

/// Rounds to whole currency units (0 decimal places).
///
/// Only grand totals of adjustment notes use this.
#[inline]
pub fn round_whole(x: Decimal, mode: RoundingMode) -> Decimal {
    round_to(x, 0, mode)
}

// =============================================================================
// Boundary Coercion
// =============================================================================

/// Clamps negative values to zero.
#[inline]
pub fn non_negative(x: Decimal) -> Decimal {
    if x.is_sign_negative() {
        Decimal::ZERO
    } else {
        x
    }
}

/// Parses a form field into a non-negative amount.
///
/// ## Rules
/// - Blank input parses to 0
/// - Unparseable input parses to 0
/// - Negative input clamps to 0
/// - `,` thousands separators are ignored
///
/// ## Example
/// ```rust
/// use godown_core::money::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount(" 1,049.65 "), Decimal::new(104965, 2));
/// assert_eq!(parse_amount("abc"), Decimal::ZERO);
/// ```
pub fn parse_amount(input: &str) -> Decimal {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .map(non_negative)
        .unwrap_or(Decimal::ZERO)
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount as rupees with Indian digit grouping.
///
/// ## Example
/// ```rust
/// use godown_core::money::format_inr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_inr(Decimal::new(118000, 2)), "₹1,180.00");
/// assert_eq!(format_inr(Decimal::new(1234567891, 2)), "₹1,23,45,678.91");
/// assert_eq!(format_inr(Decimal::new(-12, 2)), "-₹0.12");
/// ```
///
/// ## Note
/// Rounds half away from zero to 2 dp for display. Callers that need a
/// different rule round before formatting.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round2(amount.abs(), RoundingMode::HalfAwayFromZero);
    let whole = rounded.trunc();
    let paise = ((rounded - whole) * Decimal::ONE_HUNDRED).trunc();

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!(
        "{}{}{}.{:0>2}",
        sign,
        RUPEE_SYMBOL,
        group_indian(&whole.to_string()),
        paise.to_string()
    )
}

/// Formats the round-off line of a note.
///
/// Returns `None` for a zero round-off so the caller can suppress the line.
///
/// ## Example
/// ```rust
/// use godown_core::money::format_round_off;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_round_off(Decimal::new(35, 2)).as_deref(), Some("+₹0.35"));
/// assert_eq!(format_round_off(Decimal::new(-12, 2)).as_deref(), Some("-₹0.12"));
/// assert_eq!(format_round_off(Decimal::ZERO), None);
/// ```
pub fn format_round_off(round_off: Decimal) -> Option<String> {
    if round_off.is_zero() {
        return None;
    }

    let formatted = format_inr(round_off);
    if round_off.is_sign_negative() {
        Some(formatted)
    } else {
        Some(format!("+{}", formatted))
    }
}

/// Groups digits as 12,34,567 (last three, then pairs).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// =============================================================================
// Unit Tests
// =============================================================================
