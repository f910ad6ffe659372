use tracing_subscriber::EnvFilter;

/// Variable holding the log filter, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "EXECVM_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Logs always go to stderr so they never
/// mix with a chained program's stdout.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if let Err(e) = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
    {
        eprintln!("execvm: failed to initialize logging: {}", e);
    }
}
