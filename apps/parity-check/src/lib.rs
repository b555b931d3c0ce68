//! # Godown Parity Check
//!
//! Replays backend-recorded notes and vouchers through godown-core and
//! reports where the two disagree.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Parity Check                                    │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  config        │  │  fixture       │  │  report                    ││
//! │  │                │  │                │  │                            ││
//! │  │ • env vars     │  │ • load JSON    │  │ • replay                   ││
//! │  │ • CLI override │  │ • adjustment   │  │ • field diff               ││
//! │  │                │  │ • payment      │  │ • fail fast                ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `GODOWN_FIXTURES` - Fixture file (default: fixtures/parity.json)
//! - `GODOWN_ROUNDING` - `half_away_from_zero` (default) or `half_even`
//! - `GODOWN_FAIL_FAST` - Stop at the first failing case (default: false)
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod error;
pub mod fixture;
pub mod report;

// Re-exports
pub use config::{ConfigError, ParityConfig};
pub use error::{ParityError, ParityResult};
pub use fixture::{load_fixtures, Fixture, FixtureFile};
pub use report::{replay, Mismatch, ParityReport};
