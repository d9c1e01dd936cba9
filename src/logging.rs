//! Logging setup for the console.
//!
//! Installs a global tracing subscriber that writes to stdout and to a log
//! file created for this launch. Older launch logs are pruned so the log
//! directory stays bounded.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Filter used when neither `RUST_LOG` nor the settings file provide one.
pub const DEFAULT_LOG_FILTER: &str = "info";
/// Number of launch logs kept on disk.
const KEEP_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "trainconsole";
const LOG_EXTENSION: &str = "log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log directory could not be resolved or created.
    #[error("Log directory unavailable: {0}")]
    Directory(#[from] app_dirs::AppDirError),
    /// A filesystem operation on the log directory failed.
    #[error("Log file operation failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to format a timestamp for the log filename.
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Directory of per-launch log files sharing one prefix.
struct LaunchLogs {
    dir: PathBuf,
}

impl LaunchLogs {
    fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Create an empty file for this launch and return its name.
    fn create_for(&self, started: OffsetDateTime) -> Result<String, LoggingError> {
        let name = launch_file_name(started)?;
        let path = self.dir.join(&name);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggingError::Io { path, source })?;
        Ok(name)
    }

    /// Delete the oldest `.log` files until at most `keep` remain.
    fn prune(&self, keep: usize) -> Result<(), LoggingError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| LoggingError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let mut logs: Vec<(SystemTime, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
            .map(|entry| entry.path())
            .filter(|path| is_log_file(path))
            .map(|path| {
                let modified = fs::metadata(&path)
                    .and_then(|meta| meta.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (modified, path)
            })
            .collect();
        if logs.len() <= keep {
            return Ok(());
        }
        logs.sort_by_key(|(modified, _)| *modified);
        let excess = logs.len() - keep;
        for (_, path) in logs.into_iter().take(excess) {
            fs::remove_file(&path).map_err(|source| LoggingError::Io { path, source })?;
        }
        Ok(())
    }
}

/// Initialize tracing to write to stdout and a per-launch log file.
///
/// `RUST_LOG` wins over `filter`. Subsequent calls are no-ops. Failures are
/// returned so callers can keep running without file logs.
pub fn init(filter: &str) -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let logs = LaunchLogs::new(app_dirs::logs_dir()?);
    let file_name = logs.create_for(now_local_or_utc())?;
    logs.prune(KEEP_LOG_FILES)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::never(&logs.dir, &file_name));
    let timer = display_timer();
    let subscriber = Registry::default()
        .with(env_filter(filter))
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(
        "Logging initialized; log file at {}",
        logs.dir.join(file_name).display()
    );
    Ok(())
}

fn is_log_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(LOG_EXTENSION)
}

fn launch_file_name(started: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let stamp = started.format(NAME_FORMAT)?;
    Ok(format!("{LOG_FILE_PREFIX}_{stamp}.{LOG_EXTENSION}"))
}

fn display_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>>
{
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
