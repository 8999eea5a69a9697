//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Library code only emits through the `log` facade; binaries call this once
/// at startup to route records through `env_logger`. `RUST_LOG` overrides the
/// default `info` level.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
