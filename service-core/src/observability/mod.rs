pub mod logging;

pub use logging::init_tracing;
pub use tracing_subscriber::util::TryInitError;
