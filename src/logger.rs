// Logging setup: tracing events go to stderr through tracing-subscriber.
// --debug raises the default level from info to debug; RUST_LOG overrides both.

use tracing_subscriber::EnvFilter;

pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
