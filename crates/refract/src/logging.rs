//! Subscriber setup for the CLI.
//!
//! Logs always go to stderr so stdout carries nothing but JSON results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
pub fn init(level: &str, json_format: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json_format {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Combine the `[logging]` section with the `-v` and `--json-logs` flags.
pub fn init_from_config(config: &refract_core::Config, verbose: bool, json_logs: bool) {
    let level = effective_level(&config.logging.level, verbose);
    init(level, json_logs || config.logging.format == "json");
}

/// `-v` lifts anything quieter than debug up to debug.
fn effective_level(configured: &str, verbose: bool) -> &str {
    if verbose && !configured.eq_ignore_ascii_case("trace") {
        "debug"
    } else {
        configured
    }
}
