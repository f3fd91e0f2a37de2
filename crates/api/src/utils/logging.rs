use std::time::Duration;

use congregate_domain::CongregateError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Env var selecting the output format (`json` or anything else for text).
pub const LOG_FORMAT_ENV: &str = "CONGREGATE_LOG_FORMAT";

/// Default directive when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "congregate=debug,congregate_lib=debug,congregate_core=debug,congregate_infra=debug"
    } else {
        "congregate=info,congregate_lib=info,congregate_core=info,congregate_infra=info"
    }
}

/// Install the global subscriber. Logs go to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose);

    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` is a stable identifier such as `"members::delete"`; it must not
/// carry user input.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    error: Option<&CongregateError>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = err.label(),
            "command_execution_failure"
        ),
    }
}
