use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber, filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("logging initialized");
    }
}
