use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError};

/// Install the global subscriber: `EnvFilter` plus a flattened JSON fmt layer.
///
/// `RUST_LOG` wins over `log_level` when set. Calling this twice is harmless;
/// the second call reports `TryInitError` and leaves the first subscriber in place.
pub fn init_tracing(service_name: &str, log_level: &str) -> Result<(), TryInitError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init()?;

    tracing::debug!(service = service_name, "Tracing initialized");
    Ok(())
}
