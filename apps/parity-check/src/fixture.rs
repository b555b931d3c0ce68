//! # Fixtures
//!
//! Documents exported from the backend together with the figures its SQL
//! functions stored for them.
//!
//! ## File Shape
//! ```text
//! {
//!   "cases": [
//!     {
//!       "kind": "adjustment",
//!       "name": "CN-0042",
//!       "items": [...], "regime": "gst", "direction": "credit",
//!       "invoice_outstanding": "5000.00",
//!       "expected": { "subtotal": "...", ..., "grand_total": "1050" }
//!     },
//!     {
//!       "kind": "payment",
//!       "name": "PV-0007",
//!       "total_amount": "10000.00", "tds_rate_percent": "10", "tds_applicable": true,
//!       "expected": { "tds_amount": "1000.00", "net_amount": "9000.00" }
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use godown_core::{AdjustmentDirection, LineItem, TaxRegime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ParityError, ParityResult};

/// A fixture file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureFile {
    pub cases: Vec<Fixture>,
}

/// One recorded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fixture {
    Adjustment(AdjustmentFixture),
    Payment(PaymentFixture),
}

impl Fixture {
    pub fn name(&self) -> &str {
        match self {
            Fixture::Adjustment(case) => &case.name,
            Fixture::Payment(case) => &case.name,
        }
    }
}

/// A credit or debit note as the backend stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFixture {
    pub name: String,

    /// Backend row id, when exported.
    #[serde(default)]
    pub document_id: Option<Uuid>,

    pub items: Vec<LineItem>,
    pub regime: TaxRegime,
    pub direction: AdjustmentDirection,
    pub invoice_outstanding: Decimal,
    pub expected: ExpectedAdjustment,
}

/// Figures stored on the note header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedAdjustment {
    pub subtotal: Decimal,
    pub total_cgst: Decimal,
    pub total_sgst: Decimal,
    pub total_igst: Decimal,
    pub total_tax: Decimal,
    pub round_off: Decimal,
    pub grand_total: Decimal,

    /// Invoice outstanding after posting; older exports lack it.
    #[serde(default)]
    pub new_outstanding: Option<Decimal>,
}

/// A payment voucher as the backend stored it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentFixture {
    pub name: String,

    #[serde(default)]
    pub document_id: Option<Uuid>,

    pub total_amount: Decimal,
    pub tds_rate_percent: Decimal,
    pub tds_applicable: bool,
    pub expected: ExpectedPayment,
}

/// Figures stored on the voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedPayment {
    pub tds_amount: Decimal,
    pub net_amount: Decimal,
}

/// Parses fixtures from a JSON string.
pub fn parse_fixtures(json: &str, path: &Path) -> ParityResult<FixtureFile> {
    serde_json::from_str(json).map_err(|source| ParityError::Fixture {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a fixture file.
pub fn load_fixtures(path: &Path) -> ParityResult<FixtureFile> {
    let json = fs::read_to_string(path).map_err(|source| ParityError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fixtures(&json, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "cases": [
            {
                "kind": "adjustment",
                "name": "CN-0042",
                "items": [
                    {
                        "product_id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
                        "quantity": "10",
                        "rate": "100",
                        "tax_rate_percent": "18"
                    }
                ],
                "regime": "gst",
                "direction": "credit",
                "invoice_outstanding": "5000.00",
                "expected": {
                    "subtotal": "1000.00",
                    "total_cgst": "90.00",
                    "total_sgst": "90.00",
                    "total_igst": "0.00",
                    "total_tax": "180.00",
                    "round_off": "0.00",
                    "grand_total": "1180"
                }
            },
            {
                "kind": "payment",
                "name": "PV-0007",
                "document_id": "00000000-0000-0000-0000-000000000007",
                "total_amount": "10000.00",
                "tds_rate_percent": "10",
                "tds_applicable": true,
                "expected": { "tds_amount": "1000.00", "net_amount": "9000.00" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_fixtures() {
        let file = parse_fixtures(SAMPLE, Path::new("sample.json")).unwrap();
        assert_eq!(file.cases.len(), 2);
        assert_eq!(file.cases[0].name(), "CN-0042");
        assert_eq!(file.cases[1].name(), "PV-0007");

        match &file.cases[0] {
            Fixture::Adjustment(case) => {
                assert_eq!(case.regime, TaxRegime::Gst);
                assert_eq!(case.direction, AdjustmentDirection::Credit);
                assert_eq!(case.document_id, None);
                assert_eq!(case.expected.new_outstanding, None);
                assert_eq!(case.expected.grand_total, Decimal::new(1180, 0));
            }
            other => panic!("expected adjustment, got {other:?}"),
        }

        match &file.cases[1] {
            Fixture::Payment(case) => {
                assert_eq!(case.document_id, Some(Uuid::from_u128(7)));
                assert!(case.tds_applicable);
            }
            other => panic!("expected payment, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_fixtures_name_the_file() {
        let err = parse_fixtures(r#"{"cases": [{"kind": "receipt"}]}"#, Path::new("bad.json"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Malformed fixtures in bad.json"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_fixtures(Path::new("/nonexistent/parity.json")).unwrap_err();
        assert!(matches!(err, ParityError::Io { .. }));
    }
}
