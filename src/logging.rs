//! Diagnostic logging for the `font-catalog` binary.
//!
//! Routes `log::info!()` and friends to stderr, so stdout stays reserved for
//! command output. The level is decided in this order:
//! 1. `--log-level` CLI flag
//! 2. `FONT_CATALOG_LOG` environment variable
//! 3. `log_level` from the config file (applied after the config is loaded)

use font_catalog_config::LogLevel;
use std::io::Write;

/// Environment variable consulted when no `--log-level` flag is given.
pub const LOG_ENV_VAR: &str = "FONT_CATALOG_LOG";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{timestamp}] [{:<5}] [{}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Level requested through the CLI or the environment, if any.
pub fn requested_level(cli_level: Option<LogLevel>) -> Option<LogLevel> {
    cli_level.or_else(|| {
        std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|value| LogLevel::parse(&value))
    })
}

/// Install the stderr logger.
///
/// Safe to call more than once; only the first call installs the logger, but
/// every call updates the level.
pub fn init(level: LogLevel) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(level.to_level_filter());
}

/// Apply the configured level unless the CLI or environment already chose one.
pub fn apply_config_level(cli_level: Option<LogLevel>, config_level: LogLevel) {
    if requested_level(cli_level).is_none() {
        log::set_max_level(config_level.to_level_filter());
    }
}
