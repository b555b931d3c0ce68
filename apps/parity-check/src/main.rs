//! # Godown Parity Check
//!
//! ```text
//! parity-check [FIXTURES]
//! ```
//!
//! Exits non-zero when any recorded document disagrees with the core.

use anyhow::bail;
use tracing::info;
use tracing_subscriber::EnvFilter;

use godown_parity::{load_fixtures, replay, ParityConfig};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    // Load configuration
    let mut config = ParityConfig::load()?;
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_fixtures_path(path);
    }
    info!(
        fixtures = %config.fixtures_path.display(),
        rounding = %config.rounding,
        fail_fast = config.fail_fast,
        "Configuration loaded"
    );

    let file = load_fixtures(&config.fixtures_path)?;
    info!(cases = file.cases.len(), "Fixtures loaded");

    let report = replay(&file.cases, &config);
    info!(
        checked = report.checked,
        failed = report.failed_cases(),
        mismatches = report.mismatches.len(),
        "Replay complete"
    );

    if !report.is_clean() {
        bail!(
            "{} of {} cases disagree with the backend",
            report.failed_cases(),
            report.checked
        );
    }

    Ok(())
}
