//! # Payment Calculator
//!
//! Net amount of payment and receipt vouchers after TDS.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Advance ₹10,000            or    Allocations                           │
//! │                                     INV-101  ₹6,000.25                  │
//! │                                     INV-107  ₹3,999.75                  │
//! │        │                                   │                            │
//! │        └──────────────► total_amount ◄─────┘  round2                    │
//! │                              │                                          │
//! │                 TDS 10% ─────┤  tds = round2(total × rate / 100)        │
//! │                              ▼                                          │
//! │                        net_amount = round2(total - tds)                 │
//! │                                                                         │
//! │  Unlike adjustment notes, net_amount is NOT rounded to whole rupees.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::{non_negative, round2, CalculationPolicy};
use crate::types::PaymentResult;

// =============================================================================
// Payment Amount
// =============================================================================

/// Money settled against one invoice by a voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceAllocation {
    #[ts(as = "String")]
    pub invoice_id: Uuid,

    /// Human-readable invoice number, for validation messages.
    pub invoice_number: String,

    /// Unpaid balance of the invoice before this voucher.
    #[ts(type = "string")]
    pub outstanding: Decimal,

    /// Amount of this voucher applied to the invoice.
    #[ts(type = "string")]
    pub amount: Decimal,
}

/// Where a voucher's total comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaymentAmount {
    /// A flat on-account amount.
    Advance {
        #[ts(type = "string")]
        amount: Decimal,
    },
    /// Amounts settled against specific invoices.
    Allocations { allocations: Vec<InvoiceAllocation> },
}

impl PaymentAmount {
    /// Unrounded total of the voucher. Negative parts clamp to zero.
    ///
    /// ## Example
    /// ```rust
    /// use godown_core::payment::PaymentAmount;
    /// use rust_decimal::Decimal;
    ///
    /// let advance = PaymentAmount::Advance { amount: Decimal::new(-50, 0) };
    /// assert_eq!(advance.total(), Decimal::ZERO);
    /// ```
    pub fn total(&self) -> Decimal {
        match self {
            PaymentAmount::Advance { amount } => non_negative(*amount),
            PaymentAmount::Allocations { allocations } => allocations
                .iter()
                .map(|a| non_negative(a.amount))
                .fold(Decimal::ZERO, Decimal::saturating_add),
        }
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Calculates total, TDS and net of a voucher.
///
/// ## Rules
/// - `total_amount = round2(total_amount)`
/// - TDS only when applicable AND the rounded rate is positive
/// - `tds_amount = round2(total_amount × rate / 100)`
/// - `net_amount = round2(total_amount - tds_amount)`, never whole-rupee rounded
/// - Products and sums saturate at `Decimal::MAX` instead of overflowing
///
/// ## Example
/// ```rust
/// use godown_core::money::CalculationPolicy;
/// use godown_core::payment::calculate_payment_net;
/// use rust_decimal::Decimal;
///
/// let result = calculate_payment_net(
///     Decimal::new(10000, 0),
///     Decimal::new(10, 0),
///     true,
///     CalculationPolicy::default(),
/// );
/// assert_eq!(result.tds_amount, Decimal::new(1000, 0));
/// assert_eq!(result.net_amount, Decimal::new(9000, 0));
/// ```
pub fn calculate_payment_net(
    total_amount: Decimal,
    tds_rate_percent: Decimal,
    tds_applicable: bool,
    policy: CalculationPolicy,
) -> PaymentResult {
    let mode = policy.rounding;

    let total_amount = round2(non_negative(total_amount), mode);
    let tds_rate = if tds_applicable {
        round2(non_negative(tds_rate_percent), mode)
    } else {
        Decimal::ZERO
    };

    let tds_amount = if tds_applicable && tds_rate > Decimal::ZERO {
        round2(total_amount.saturating_mul(tds_rate) / Decimal::ONE_HUNDRED, mode)
    } else {
        Decimal::ZERO
    };
    let net_amount = round2(total_amount.saturating_sub(tds_amount), mode);

    debug!(%total_amount, %tds_rate, %tds_amount, %net_amount, "Calculated payment net");

    PaymentResult {
        total_amount,
        tds_amount,
        net_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn net(total: &str, rate: &str, applicable: bool) -> PaymentResult {
        calculate_payment_net(d(total), d(rate), applicable, CalculationPolicy::default())
    }

    #[test]
    fn test_tds_deducted() {
        let result = net("10000", "10", true);
        assert_eq!(result.total_amount, d("10000"));
        assert_eq!(result.tds_amount, d("1000"));
        assert_eq!(result.net_amount, d("9000"));
    }

    #[test]
    fn test_net_keeps_paise() {
        // 1234.56 × 2% = 24.6912 → 24.69; net 1209.87, not rounded to 1210
        let result = net("1234.56", "2", true);
        assert_eq!(result.tds_amount, d("24.69"));
        assert_eq!(result.net_amount, d("1209.87"));
    }

    #[test]
    fn test_tds_not_applicable_ignores_rate() {
        let result = net("5000", "10", false);
        assert!(result.tds_amount.is_zero());
        assert_eq!(result.net_amount, d("5000"));
    }

    #[test]
    fn test_zero_or_negative_rate_means_no_tds() {
        assert!(net("5000", "0", true).tds_amount.is_zero());
        assert!(net("5000", "-1", true).tds_amount.is_zero());
        assert!(net("5000", "0.004", true).tds_amount.is_zero());
    }

    #[test]
    fn test_total_rounded_first() {
        let result = net("999.995", "1", true);
        assert_eq!(result.total_amount, d("1000.00"));
        assert_eq!(result.tds_amount, d("10.00"));
        assert_eq!(result.net_amount, d("990.00"));
    }

    #[test]
    fn test_allocations_total() {
        let amount = PaymentAmount::Allocations {
            allocations: vec![
                InvoiceAllocation {
                    invoice_id: Uuid::new_v4(),
                    invoice_number: "INV-101".to_string(),
                    outstanding: d("8000"),
                    amount: d("6000.25"),
                },
                InvoiceAllocation {
                    invoice_id: Uuid::new_v4(),
                    invoice_number: "INV-107".to_string(),
                    outstanding: d("4000"),
                    amount: d("3999.75"),
                },
            ],
        };

        assert_eq!(amount.total(), d("10000"));
    }

    #[test]
    fn test_payment_amount_wire_shape() {
        let amount: PaymentAmount =
            serde_json::from_str(r#"{"mode":"advance","amount":"2500.50"}"#).unwrap();
        assert_eq!(amount, PaymentAmount::Advance { amount: d("2500.50") });
    }

    #[test]
    fn test_decimal_max_saturates() {
        let result = net("79228162514264337593543950335", "10", true);
        assert_eq!(result.total_amount, Decimal::MAX);
        assert!(result.tds_amount > Decimal::ZERO);
        assert!(result.net_amount > Decimal::ZERO);
        assert!(result.net_amount < result.total_amount);

        let allocation = |amount| InvoiceAllocation {
            invoice_id: Uuid::new_v4(),
            invoice_number: "INV-MAX".to_string(),
            outstanding: Decimal::MAX,
            amount,
        };
        let amount = PaymentAmount::Allocations {
            allocations: vec![allocation(Decimal::MAX), allocation(Decimal::MAX)],
        };
        assert_eq!(amount.total(), Decimal::MAX);
    }
}
