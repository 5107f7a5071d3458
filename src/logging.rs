//! Stderr logging so stdout stays reserved for reports.
//!
//! `RUST_LOG` wins over the verbosity flag when set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,relcalc=debug",
        _ => "debug,relcalc=trace",
    }
}

/// Installs the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init()
        .is_ok()
    {
        tracing::debug!(verbosity, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "warn");
        assert!(default_directive(1).contains("relcalc=debug"));
        assert!(default_directive(5).contains("relcalc=trace"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init(0);
        init(2);
    }
}
