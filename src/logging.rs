// src/logging.rs

//! Diagnostic tracing for the CLI.
//!
//! Reads `RUST_LOG`, defaults to `warn`, writes compact lines to stderr so
//! stdout stays reserved for mapped output.
//!
//! ```bash
//! RUST_LOG=statusmap=debug statusmap map reports/example.json --model member
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when embedded in a host.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
