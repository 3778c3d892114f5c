//! Structured logging setup
//!
//! Events go to stderr so generated code on stdout stays clean. `RUST_LOG`
//! takes precedence over the level chosen from `-v` flags and configuration.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::Verbosity;

/// Level for a `-v` count, falling back to the configured verbosity at zero
pub fn level_for(verbose: u8, verbosity: Verbosity) -> Level {
    match verbose {
        0 => match verbosity {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("validgen={}", level.to_string().to_lowercase())));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbose_count() {
        assert_eq!(level_for(1, Verbosity::Quiet), Level::INFO);
        assert_eq!(level_for(2, Verbosity::Normal), Level::DEBUG);
        assert_eq!(level_for(7, Verbosity::Normal), Level::TRACE);
    }

    #[test]
    fn test_level_for_configured_verbosity() {
        assert_eq!(level_for(0, Verbosity::Quiet), Level::ERROR);
        assert_eq!(level_for(0, Verbosity::Normal), Level::WARN);
        assert_eq!(level_for(0, Verbosity::Verbose), Level::INFO);
        assert_eq!(level_for(0, Verbosity::Debug), Level::DEBUG);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(Level::WARN);
        init(Level::DEBUG);
    }
}
