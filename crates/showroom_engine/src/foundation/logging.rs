//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use log::LevelFilter;

/// Initialize the logging system with a default level
///
/// `level` is one of `off`, `error`, `warn`, `info`, `debug`, `trace`; unknown
/// values fall back to `info`. A `RUST_LOG` directive in the environment takes
/// precedence over the default.
pub fn init(level: &str) -> Result<(), log::SetLoggerError> {
    let filter = parse_level(level);
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_env("RUST_LOG")
        .try_init()
}

/// Parse a textual log level
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level(" off "), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
