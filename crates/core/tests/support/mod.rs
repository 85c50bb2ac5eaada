//! Shared test helpers for `baralga-core` integration tests.
//!
//! Fixtures build activity records on fixed dates; the mirror renderer
//! replays view changes the way a real list widget would.

#![allow(dead_code)]

pub mod fixtures;
pub mod renderer;

/// Route `tracing` output through the test harness so it only shows for
/// failing tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("baralga_core=trace"))
        .with_test_writer()
        .try_init();
}
