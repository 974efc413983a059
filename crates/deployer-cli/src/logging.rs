//! Log output for library `tracing` events

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `--debug` forces the `debug` level; otherwise `RUST_LOG` applies, with
/// `info` when unset.
pub fn init(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
