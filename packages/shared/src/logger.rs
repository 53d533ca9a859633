//! Logging setup shared by the Idobata binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG` when set; otherwise logs the given binary at
/// `default_level` and everything else at `warn`. Output goes to stderr so
/// log lines never interleave with the rendered chat stream on stdout.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    // CARGO_BIN_NAME uses dashes; tracing targets use the crate name
    let target = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{target}={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Tracing initialized for '{}'", bin_name);
}
