//! Once-only tracing subscriber for test binaries.
//!
//! Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`:
//!
//! ```bash
//! TEST_LOG=team_draft=debug cargo test -p team-draft
//! ```

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

const QUIET: &str = "warn";

/// Filter directive picked from the two variables, first non-blank wins.
fn directive(test_log: Option<String>, rust_log: Option<String>) -> String {
    [test_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| QUIET.to_string())
}

/// Install the subscriber. Safe to call from every test and every `ctor`.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::new(directive(
            std::env::var("TEST_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        ));

        // Another subscriber may already be installed in this process.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init();
    });
}
