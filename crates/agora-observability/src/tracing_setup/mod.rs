//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use agora_core::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// Respects the `AGORA_LOG` environment variable for filtering and falls back
/// to `config.log_level`. Emits JSON lines when `config.json_logs` is set.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("AGORA_LOG")
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true);
        // A host may already own the global subscriber.
        let _ = if config.json_logs {
            builder
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .try_init()
        } else {
            builder.try_init()
        };
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
