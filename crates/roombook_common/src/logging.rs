//! Logging utilities for the room booking service.
//!
//! Every crate logs through `tracing`; this module installs the subscriber
//! once at process start.

use tracing::{error, info, Level};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// `RUST_LOG` directives are honoured on top of the default
/// `roombook=<level>` directive.
///
/// # Examples
///
/// ```
/// use roombook_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(
        format!("roombook={}", level)
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into()),
    );

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
