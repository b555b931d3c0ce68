//! # godown-core: Pure Financial Engine for Godown
//!
//! GST split, rounding policy and outstanding-balance arithmetic for
//! adjustment notes and payment vouchers. Zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Godown Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web client (review steps)                    │   │
//! │  │   Note wizard ──► Review ──► Submit      Payment ──► Review     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ preview                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ godown-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌───────────┐ ┌──────────┐ ┌────────┐ ┌────────┐  │   │
//! │  │  │  money  │ │ selection │ │adjustment│ │payment │ │ review │  │   │
//! │  │  │ round2  │ │  filter   │ │ GST/IGST │ │  TDS   │ │ rules  │  │   │
//! │  │  └─────────┘ └───────────┘ └──────────┘ └────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ submit                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        Backend RPC (source of truth, recomputes and stores)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Rounding primitives, amount parsing, rupee formatting
//! - [`types`] - Line items, tax regime, results
//! - [`selection`] - Per-product selection filter
//! - [`adjustment`] - Credit/debit note totals
//! - [`payment`] - Voucher totals with TDS
//! - [`validation`] - Business rules that block submission
//! - [`review`] - Review-step orchestration
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe to call on every render
//! 2. **Decimal Money**: `rust_decimal`, never floats
//! 3. **Round Where the Backend Rounds**: each step, in the same order
//! 4. **Total Calculators**: bad input coerces to zero; only `review` errors
//!
//! ## Example Usage
//!
//! ```rust
//! use godown_core::{calculate_payment_net, CalculationPolicy};
//! use rust_decimal::Decimal;
//!
//! let voucher = calculate_payment_net(
//!     Decimal::new(10000, 0),
//!     Decimal::new(10, 0),
//!     true,
//!     CalculationPolicy::default(),
//! );
//!
//! // Vouchers keep paise; only notes round to whole rupees
//! assert_eq!(voucher.net_amount, Decimal::new(9000, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adjustment;
pub mod error;
pub mod money;
pub mod payment;
pub mod review;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use adjustment::calculate_adjustment_totals;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{round2, CalculationPolicy, RoundingMode};
pub use payment::{calculate_payment_net, InvoiceAllocation, PaymentAmount};
pub use review::{prepare_adjustment_note, prepare_payment};
pub use types::*;
