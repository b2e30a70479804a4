//! Logging set-up for the derivator: a `simplelog` terminal logger, optionally
//! combined with a file logger.
use simplelog::*;
use std::fs::File;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGER_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Parses `off`, `error`, `warn`, `info`, `debug` or `trace` (any case).
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}

/// Installs the global logger. Only the first call has an effect, later calls (and a
/// logger installed by someone else) are ignored.
///
/// # Arguments
/// * `level` - maximal level written by both loggers
/// * `log_file` - if given, the log is also written into this file (created or truncated)
pub fn init_logger(level: LevelFilter, log_file: Option<&str>) {
    if LOGGER_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(filename) = log_file {
        match File::create(filename) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => eprintln!("cannot create log file {}: {}", filename, e),
        }
    }
    let _ = CombinedLogger::init(loggers);
}
