//! Tracing setup shared by both binaries.
//!
//! Everything is written to stderr so stdout stays reserved for the
//! processor's JSON document.

use tracing_subscriber::EnvFilter;

pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
