// tests/common.rs
//! Shared test utilities

use mindful_guard::DataEncryption;

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
#[allow(dead_code)]
pub fn setup() {
    #[cfg(feature = "logging")]
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer()) // works under `cargo test`
            .with(EnvFilter::from_default_env()) // respects RUST_LOG=
            .try_init()
            .ok(); // idempotent
    }
}

/// Encryption with a low iteration count so suites stay fast
#[allow(dead_code)]
pub fn fast_encryption(master: &str) -> DataEncryption {
    DataEncryption::new(master)
        .expect("non-empty master key")
        .with_iterations(64)
}
