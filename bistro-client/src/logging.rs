//! Logging setup
//!
//! Client-side console logging. `RUST_LOG` overrides the given level.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global subscriber
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "bistro_client=trace")
/// * `json_format` - JSON lines instead of the human readable format
///
/// Fails if a global subscriber is already installed.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}
