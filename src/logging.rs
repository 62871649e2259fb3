//! Tracing subscriber setup

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Environment variable that overrides the verbosity flags
pub const LOG_ENV: &str = "HAIRCARE_LOG";

/// Filter from `HAIRCARE_LOG`, falling back to the CLI verbosity
pub fn filter_for(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Install the global subscriber; logs go to stderr so screen output stays clean
///
/// Returns false when a subscriber was already installed (a second call in
/// the same process, as in tests); the existing one is kept.
pub fn init(verbosity: Verbosity) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    match installed {
        Ok(()) => {
            debug!(verbosity = verbosity.as_str(), "logging initialized");
            true
        }
        Err(e) => {
            debug!(error = %e, "tracing subscriber already installed, keeping it");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        init(Verbosity::Quiet);
        assert!(!init(Verbosity::VeryVerbose));
    }
}
