//! # discord-common
//!
//! Shared configuration and telemetry for the gateway client crates.

pub mod config;
pub mod telemetry;

pub use config::{ConfigError, GatewayConfig};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with, LogFormat, TelemetryError, LOG_FORMAT_VAR,
};
