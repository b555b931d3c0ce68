//! # Replay and Report
//!
//! Runs every fixture through the core calculators and collects the fields
//! that disagree with what the backend stored.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Fixture ──► calculate_adjustment_totals / calculate_payment_net       │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  compare field by field (numeric equality: 1.50 == 1.5)                │
//! │                     │                                                   │
//! │         ┌───────────┴───────────┐                                       │
//! │         ▼                       ▼                                       │
//! │      agrees                 Mismatch { case, field, expected, actual } │
//! │                                 │                                       │
//! │                                 └── fail_fast? stop replaying           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use godown_core::{
    calculate_adjustment_totals, calculate_payment_net, CalculationPolicy, CalculationResult,
    PaymentResult,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::ParityConfig;
use crate::fixture::{AdjustmentFixture, ExpectedAdjustment, ExpectedPayment, Fixture, PaymentFixture};

// =============================================================================
// Report Types
// =============================================================================

/// One field on which the core disagrees with the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub case: String,
    pub field: &'static str,
    pub expected: Decimal,
    pub actual: Decimal,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParityReport {
    /// Cases replayed (fewer than the file holds when failing fast).
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl ParityReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Number of distinct cases with at least one mismatch.
    pub fn failed_cases(&self) -> usize {
        let mut cases: Vec<&str> = self.mismatches.iter().map(|m| m.case.as_str()).collect();
        cases.dedup();
        cases.len()
    }
}

// =============================================================================
// Replay
// =============================================================================

/// Replays all fixtures under the configured rounding policy.
pub fn replay(fixtures: &[Fixture], config: &ParityConfig) -> ParityReport {
    let policy = CalculationPolicy::new(config.rounding);
    let mut report = ParityReport::default();

    for fixture in fixtures {
        let mismatches = match fixture {
            Fixture::Adjustment(case) => check_adjustment(case, policy),
            Fixture::Payment(case) => check_payment(case, policy),
        };
        report.checked += 1;

        if mismatches.is_empty() {
            debug!(case = fixture.name(), "Case agrees with backend");
            continue;
        }

        for m in &mismatches {
            warn!(
                case = %m.case,
                field = m.field,
                expected = %m.expected,
                actual = %m.actual,
                "Mismatch"
            );
        }
        report.mismatches.extend(mismatches);

        if config.fail_fast {
            info!(case = fixture.name(), "Stopping at first failing case");
            break;
        }
    }

    report
}

fn check_adjustment(case: &AdjustmentFixture, policy: CalculationPolicy) -> Vec<Mismatch> {
    let result = calculate_adjustment_totals(
        &case.items,
        case.regime,
        case.direction,
        case.invoice_outstanding,
        policy,
    );
    compare_adjustment(&case.name, &case.expected, &result)
}

fn check_payment(case: &PaymentFixture, policy: CalculationPolicy) -> Vec<Mismatch> {
    let result = calculate_payment_net(
        case.total_amount,
        case.tds_rate_percent,
        case.tds_applicable,
        policy,
    );
    compare_payment(&case.name, &case.expected, &result)
}

// =============================================================================
// Comparison
// =============================================================================

/// Field-by-field diff of a note.
pub fn compare_adjustment(
    case: &str,
    expected: &ExpectedAdjustment,
    actual: &CalculationResult,
) -> Vec<Mismatch> {
    let mut fields = vec![
        ("subtotal", expected.subtotal, actual.subtotal),
        ("total_cgst", expected.total_cgst, actual.total_cgst),
        ("total_sgst", expected.total_sgst, actual.total_sgst),
        ("total_igst", expected.total_igst, actual.total_igst),
        ("total_tax", expected.total_tax, actual.total_tax),
        ("round_off", expected.round_off, actual.round_off),
        ("grand_total", expected.grand_total, actual.grand_total),
    ];
    if let Some(new_outstanding) = expected.new_outstanding {
        fields.push(("new_outstanding", new_outstanding, actual.new_outstanding));
    }

    diff(case, fields)
}

/// Field-by-field diff of a voucher.
pub fn compare_payment(case: &str, expected: &ExpectedPayment, actual: &PaymentResult) -> Vec<Mismatch> {
    diff(
        case,
        vec![
            ("tds_amount", expected.tds_amount, actual.tds_amount),
            ("net_amount", expected.net_amount, actual.net_amount),
        ],
    )
}

fn diff(case: &str, fields: Vec<(&'static str, Decimal, Decimal)>) -> Vec<Mismatch> {
    fields
        .into_iter()
        .filter(|(_, expected, actual)| expected != actual)
        .map(|(field, expected, actual)| Mismatch {
            case: case.to_string(),
            field,
            expected,
            actual,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::parse_fixtures;
    use godown_core::RoundingMode;
    use std::path::{Path, PathBuf};

    fn config(rounding: RoundingMode, fail_fast: bool) -> ParityConfig {
        ParityConfig {
            fixtures_path: PathBuf::from("inline.json"),
            rounding,
            fail_fast,
        }
    }

    fn fixtures(json: &str) -> Vec<Fixture> {
        parse_fixtures(json, Path::new("inline.json")).unwrap().cases
    }

    // Rate rounds to 104.97 before multiplying: 1049.70, grand 1050, round-off +0.30
    const AGREEING: &str = r#"{
        "cases": [
            {
                "kind": "adjustment",
                "name": "DN-0001",
                "items": [
                    {
                        "product_id": "00000000-0000-0000-0000-000000000001",
                        "quantity": "10",
                        "rate": "104.965",
                        "tax_rate_percent": "0"
                    }
                ],
                "regime": "no_tax",
                "direction": "debit",
                "invoice_outstanding": "0",
                "expected": {
                    "subtotal": "1049.70",
                    "total_cgst": "0",
                    "total_sgst": "0",
                    "total_igst": "0",
                    "total_tax": "0",
                    "round_off": "0.30",
                    "grand_total": "1050",
                    "new_outstanding": "1050"
                }
            },
            {
                "kind": "payment",
                "name": "PV-0001",
                "total_amount": "1234.56",
                "tds_rate_percent": "2",
                "tds_applicable": true,
                "expected": { "tds_amount": "24.69", "net_amount": "1209.87" }
            }
        ]
    }"#;

    #[test]
    fn test_agreeing_fixtures_are_clean() {
        let report = replay(&fixtures(AGREEING), &config(RoundingMode::HalfAwayFromZero, false));
        assert_eq!(report.checked, 2);
        assert!(report.is_clean(), "unexpected mismatches: {:?}", report.mismatches);
    }

    // Backend stored a whole-rupee net, which vouchers never have.
    const DRIFTING: &str = r#"{
        "cases": [
            {
                "kind": "payment",
                "name": "PV-0002",
                "total_amount": "1234.56",
                "tds_rate_percent": "2",
                "tds_applicable": true,
                "expected": { "tds_amount": "24.69", "net_amount": "1210" }
            },
            {
                "kind": "payment",
                "name": "PV-0003",
                "total_amount": "100",
                "tds_rate_percent": "10",
                "tds_applicable": false,
                "expected": { "tds_amount": "10", "net_amount": "90" }
            }
        ]
    }"#;

    #[test]
    fn test_mismatches_are_reported_per_field() {
        let report = replay(&fixtures(DRIFTING), &config(RoundingMode::HalfAwayFromZero, false));
        assert_eq!(report.checked, 2);
        assert_eq!(report.failed_cases(), 2);
        assert_eq!(
            report.mismatches[0],
            Mismatch {
                case: "PV-0002".to_string(),
                field: "net_amount",
                expected: Decimal::new(1210, 0),
                actual: Decimal::new(120987, 2),
            }
        );
        assert_eq!(report.mismatches.len(), 3);
    }

    #[test]
    fn test_fail_fast_stops_after_first_failing_case() {
        let report = replay(&fixtures(DRIFTING), &config(RoundingMode::HalfAwayFromZero, true));
        assert_eq!(report.checked, 1);
        assert_eq!(report.failed_cases(), 1);
    }

    #[test]
    fn test_rounding_mode_is_applied() {
        // 1 × 1048.50 at 0%: half away from zero → 1049, half even → 1048
        let json = r#"{
            "cases": [
                {
                    "kind": "adjustment",
                    "name": "CN-0009",
                    "items": [
                        {
                            "product_id": "00000000-0000-0000-0000-000000000009",
                            "quantity": "1",
                            "rate": "1048.50",
                            "tax_rate_percent": "0"
                        }
                    ],
                    "regime": "no_tax",
                    "direction": "credit",
                    "invoice_outstanding": "2000",
                    "expected": {
                        "subtotal": "1048.50",
                        "total_cgst": "0",
                        "total_sgst": "0",
                        "total_igst": "0",
                        "total_tax": "0",
                        "round_off": "0.50",
                        "grand_total": "1049",
                        "new_outstanding": "951"
                    }
                }
            ]
        }"#;

        let cases = fixtures(json);
        assert!(replay(&cases, &config(RoundingMode::HalfAwayFromZero, false)).is_clean());

        let report = replay(&cases, &config(RoundingMode::HalfEven, false));
        let fields: Vec<&str> = report.mismatches.iter().map(|m| m.field).collect();
        assert_eq!(fields, vec!["round_off", "grand_total", "new_outstanding"]);
    }
}
