//! Logging configuration
//!
//! Initializes tracing for the application. Logs go to stderr so the
//! generated YAML can be written to stdout.

/// Initializes logging with the specified level
///
/// `RUST_LOG` takes precedence over `level`. Calling it a second time
/// keeps the first subscriber.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        // Just verify it doesn't panic
        init_logging("debug");
        init_logging("info");
    }
}
