//! Process-wide logging setup for the `weekplan` binary.
//!
//! The library only emits through the `log` facade. The binary calls
//! [`init_logging`] once, which starts a `flexi_logger` writing to stderr.
//! Calling it again with the same level is a no-op.

use crate::error::{PlannerError, Result};
use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

/// Environment variable holding the log level, e.g. `WEEKPLAN_LOG=debug`.
pub const LOG_ENV: &str = "WEEKPLAN_LOG";
pub const DEFAULT_LEVEL: &str = "warn";

static LOGGER: OnceCell<(&'static str, LoggerHandle)> = OnceCell::new();

/// Picks the level: `--verbose` wins, then [`LOG_ENV`], then [`DEFAULT_LEVEL`].
pub fn resolve_level(verbose: bool, env_value: Option<&str>) -> Result<&'static str> {
    if verbose {
        return Ok("debug");
    }
    match env_value {
        Some(raw) => normalize_level(raw),
        None => Ok(DEFAULT_LEVEL),
    }
}

pub fn init_logging(level: &str) -> Result<()> {
    let level = normalize_level(level)?;
    if let Some((active, _)) = LOGGER.get() {
        if *active != level {
            log::warn!("logging already running at {}, ignoring {}", active, level);
        }
        return Ok(());
    }

    LOGGER.get_or_try_init(|| -> Result<_> {
        let handle = Logger::try_with_str(level)
            .map_err(|e| PlannerError::Config(format!("invalid log level `{}`: {}", level, e)))?
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
            .map_err(|e| PlannerError::Config(format!("failed to start logger: {}", e)))?;
        Ok((level, handle))
    })?;
    log::debug!("logging started at {}", level);
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(PlannerError::Config(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error|off",
            other
        ))),
    }
}
