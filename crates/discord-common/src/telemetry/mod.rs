//! Telemetry setup

mod tracing_setup;

pub use tracing_setup::{
    try_init_tracing, try_init_tracing_with, LogFormat, TelemetryError, LOG_FORMAT_VAR,
};
