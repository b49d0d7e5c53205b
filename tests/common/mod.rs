#![allow(dead_code)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

use proptest::prelude::ProptestConfig;
use proptest::test_runner::RngSeed;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Environment variable holding a fixed property-test seed for reproduction.
pub const PROPTEST_SEED_ENV: &str = "PARASCOPE_PROPTEST_SEED";

/// Initializes test logging once per process.
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Builds a proptest config with `cases` cases, honoring a fixed seed from
/// the environment for deterministic reruns.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let mut config = ProptestConfig::with_cases(cases);
    if let Some(seed) = read_seed() {
        config.rng_seed = RngSeed::Fixed(seed);
    }
    config
}

fn read_seed() -> Option<u64> {
    std::env::var(PROPTEST_SEED_ENV).ok()?.trim().parse().ok()
}
