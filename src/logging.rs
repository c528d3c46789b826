// src/logging.rs
// =============================================================================
// Sets up debug logging.
//
// Logging goes through the `tracing` macros (tracing::debug!, warn!, ...).
// Nothing is printed until a subscriber is installed, which main() does
// once at startup:
// - with --debug: everything from DEBUG up
// - without: only warnings and errors
//
// Logs go to stderr so they never mix with the post-run message on stdout.
// =============================================================================

use tracing::Level;

// Picks the log level for the --debug flag
pub fn level(debug: bool) -> Level {
    if debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

// Installs the global subscriber
//
// try_init() fails only if a subscriber is already set (e.g. in tests),
// in which case the existing one keeps working.
pub fn init(debug: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level(debug))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
