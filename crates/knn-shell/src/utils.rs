//! Logging setup for the CLI.

use std::path::{Path, PathBuf};

use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};

/// Configures the logger.
///
/// Records go to `<logs_dir>/<file_name>.log`, rotated daily. Diagnostics
/// from ftlog's own appender go to `<logs_dir>/<file_name>.err.log`. The
/// returned guard must be held until the run ends so buffered lines are
/// flushed.
///
/// # Errors
///
/// - If the logs directory could not be located/created.
/// - If the logger could not be initialized.
pub fn configure_logger(logs_dir: &Path, file_name: &str, verbose: bool) -> Result<(LoggerGuard, PathBuf), String> {
    if !logs_dir.exists() {
        std::fs::create_dir_all(logs_dir).map_err(|e| e.to_string())?;
    }
    let logs_dir = logs_dir.canonicalize().map_err(|e| e.to_string())?;
    let log_path = logs_dir.join(format!("{file_name}.log"));
    let err_path = log_path.with_extension("err.log");

    // Skipped records are logged at `warn`; per-partition summaries at `debug`.
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let guard = ftlog::Builder::new()
        .max_log_level(level)
        .root(FileAppender::builder().path(&log_path).rotate(Period::Day).build())
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Debug)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}
