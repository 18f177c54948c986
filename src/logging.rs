// File: src/logging.rs
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a stderr subscriber. `RUST_LOG` wins over `level`, which
/// defaults to `info`.
pub fn init_logging(level: Option<Level>) {
    let level = level.unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
