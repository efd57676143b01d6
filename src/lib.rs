//! Class Representative Election Service
//!
//! Vote-casting rules, tallies and winners for a single CR election, backed
//! by a pluggable record store.

pub mod config;
pub mod election;
pub mod errors;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use election::ElectionService;
pub use errors::{Error, RejectionKind, Result};

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging from `RUST_LOG`, defaulting to `cr_election=info`
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cr_election=info".into()),
        )
        .try_init()
        .map_err(|e| Error::internal(format!("Logging already initialized: {e}")))?;

    tracing::info!("🗳️  CR election service v{} initialized", VERSION);
    Ok(())
}

/// Initialize logging with an explicit level and output format
pub fn init_with(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(format!("cr_election={}", logging.level))
        .map_err(|e| Error::validation("LOG_LEVEL", e.to_string()))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match logging.format.as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    };
    installed.map_err(|e| Error::internal(format!("Logging already initialized: {e}")))?;

    tracing::info!(
        "🗳️  CR election service v{} initialized (level={}, format={})",
        VERSION,
        logging.level,
        logging.format
    );
    Ok(())
}
