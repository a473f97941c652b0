//! Lightweight telemetry helpers for quote-notify.
//! Installs the tracing subscriber and wraps the `metrics` facade with
//! label-aware recorders.

use anyhow::Result;

mod config;
mod context;
mod recorders;
mod tracing_init;

pub use config::{LogFormat, TelemetryConfig};
pub use context::TelemetryLabels;
pub use recorders::{record_counter, record_histogram, with_common_fields};
pub use tracing_init::init_telemetry;

/// Installs the subscriber configured from `RUST_LOG`, `LOG_FORMAT` and the
/// service labels in the environment.
pub fn install(service_name: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(
        service_name,
        env!("CARGO_PKG_VERSION"),
    ))
}
