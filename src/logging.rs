//! Tracing setup. Logs go to stderr so plan output on stdout stays clean.

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity count; `0` falls back to the configured
/// level, then to `warn`.
pub fn level_filter(verbose: u8, config_level: Option<&str>) -> String {
    match verbose {
        0 => config_level.unwrap_or("warn").to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize logging. `RUST_LOG` wins over both `-v` and the config file.
pub fn init_logging(verbose: u8, config_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter(verbose, config_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("Logging initialized with verbosity {}", verbose);
    trace!("Args: {:?}", std::env::args().collect::<Vec<_>>());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter(0, None), "warn");
        assert_eq!(level_filter(0, Some("debug")), "debug");
        assert_eq!(level_filter(1, Some("error")), "info");
        assert_eq!(level_filter(2, None), "debug");
        assert_eq!(level_filter(5, None), "trace");
    }
}
