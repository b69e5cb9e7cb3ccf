use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive, e.g. `todo=debug`.
pub const LOG_ENV: &str = "TODO_LOG";

/// Install the global subscriber. Logs go to stderr so they never mix with
/// command output.
///
/// `TODO_LOG` takes precedence; otherwise `verbose` selects `debug`, and the
/// default is `warn`.
pub fn init(verbose: bool) {
    let fallback = if verbose { "todo=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
