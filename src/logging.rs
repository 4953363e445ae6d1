//! Logging utilities for the sstviz pipeline.
//!
//! Structured logging helpers so pipeline runs are searchable and the
//! expensive steps carry timings.

use std::time::Instant;
use tracing::{debug, error, info};

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Run a closure, logging its duration under an operation name.
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    debug!(operation = operation, "Starting operation");

    let result = f();

    let duration = start.elapsed();
    info!(
        operation = operation,
        duration_ms = duration.as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log detailed information about loaded data.
pub fn log_data_load_stats(
    source: &str,
    var_count: usize,
    var_names: &[&str],
    dim_count: usize,
    time_steps: usize,
) {
    info!(
        operation = "data_load",
        source = source,
        var_count = var_count,
        vars = %var_names.join(", "),
        dim_count = dim_count,
        time_steps = time_steps,
        "Data loaded successfully"
    );
}

/// Log an error with context.
pub fn log_error(error: &crate::error::SstVizError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}
