// Logging setup: a `tracing-subscriber` fmt layer on stderr, filtered by
// `RUST_LOG` or the `-v` count.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set. Other crates stay at `warn` so
/// reqwest and hyper do not drown out this crate's events.
pub fn default_directive(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!("warn,lut_cli={}", level)
}

/// Install the global subscriber. Events go to stderr so they never mix
/// with responses printed on stdout.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
