use std::io;
use std::fs;
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::UtcOffset;
use tracing_subscriber::{self, fmt, prelude::*};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_RETENTION_DAYS: u64 = 7;

/// Default log directory in the user-specific OS cache directory
/// - Linux: ~/.cache/typespec-completion/
/// - macOS: ~/Library/Caches/typespec-completion/
/// - Windows: %LOCALAPPDATA%\typespec-completion\
pub fn default_log_dir() -> io::Result<PathBuf> {
    let mut log_dir = dirs::cache_dir()
        .ok_or_else(|| io::Error::new(
            io::ErrorKind::NotFound,
            "Unable to determine user cache directory"
        ))?;
    log_dir.push("typespec-completion");
    Ok(log_dir)
}

/// Remove `session-*.log` files older than LOG_RETENTION_DAYS
fn cleanup_old_logs(log_dir: &Path) {
    let now = std::time::SystemTime::now();
    let retention = std::time::Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let is_session_log = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with("session-") && name.ends_with(".log"));
        if !is_session_log {
            continue;
        }
        let expired = entry
            .metadata()
            .and_then(|metadata| metadata.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > retention);
        if expired {
            if let Err(e) = fs::remove_file(entry.path()) {
                eprintln!("Failed to remove old log file {:?}: {}", entry.path(), e);
            }
        }
    }
}

/// Initialize logging to stderr and, when `log_dir` is given, to a session file.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the duration of the program.
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log level (otherwise uses RUST_LOG or defaults to "info")
/// * `log_dir` - Directory for the DEBUG-level session log; `None` disables file logging
pub fn init_logger(no_color: bool, log_level: Option<&str>, log_dir: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!("[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"),
    );

    let stderr_filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!no_color)
        .with_filter(stderr_filter);

    let Some(log_dir) = log_dir else {
        let result = tracing_subscriber::registry()
            .with(stderr_layer)
            .try_init();
        return match result {
            Ok(()) => Ok(None),
            Err(e) if already_set(&e) => Ok(None),
            Err(e) => Err(io::Error::other(e)),
        };
    };

    fs::create_dir_all(log_dir)?;
    cleanup_old_logs(log_dir);

    let timestamp = time::OffsetDateTime::now_utc()
        .format(format_description!("[year][month][day]-[hour][minute][second]"))
        .map_err(io::Error::other)?;
    let log_path = log_dir.join(format!("session-{}-{}.log", timestamp, std::process::id()));

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(timer)
        .with_ansi(false) // No ANSI colors in file
        .with_filter(tracing_subscriber::EnvFilter::new("debug"));

    let result = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match result {
        Ok(()) => {
            eprintln!("Logging to file: {:?}", log_path);
            Ok(Some(guard))
        }
        Err(e) if already_set(&e) => Ok(Some(guard)),
        Err(e) => Err(io::Error::other(e)),
    }
}

/// Ignore errors due to the subscriber or logger already being set
fn already_set(e: &tracing_subscriber::util::TryInitError) -> bool {
    let message = e.to_string();
    message.contains("already been set") || message.contains("SetLoggerError")
}
