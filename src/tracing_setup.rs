//! Tracing initialization for library consumers
//!
//! The engine itself only emits `tracing` events; wiring a subscriber is the
//! host process's job. This helper gives embedders and tests a one-call
//! setup honoring `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Initialize a fmt subscriber filtered by `RUST_LOG` (default: info)
///
/// Safe to call more than once; later calls are no-ops because a global
/// subscriber is already installed.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init_no_panic() {
        init_tracing();
        init_tracing();
    }
}
