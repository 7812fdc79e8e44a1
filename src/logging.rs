//! File logging for the binary.
//!
//! The TUI owns the terminal, so everything goes to a non-blocking file
//! writer. `RUST_LOG` wins over the configured level.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::app_dirs;

const LOG_FILE_NAME: &str = "nearby.log";

/// Keeps the background writer alive; dropping it flushes the log.
pub(crate) struct LoggingGuard {
	_file_guard: WorkerGuard,
	pub(crate) path: PathBuf,
}

/// Install the global subscriber writing to `file` (or the data directory).
pub(crate) fn init(level: &str, file: Option<&Path>) -> Result<LoggingGuard> {
	let path = match file {
		Some(path) => path.to_path_buf(),
		None => app_dirs::get_data_dir()?.join(LOG_FILE_NAME),
	};
	let (dir, name) = split_log_path(&path)?;
	fs::create_dir_all(&dir)
		.with_context(|| format!("failed to create log directory {}", dir.display()))?;

	let file_appender = tracing_appender::rolling::never(&dir, name);
	let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

	let file_layer = tracing_subscriber::fmt::layer()
		.with_writer(non_blocking_file)
		.with_ansi(false)
		.with_target(true);

	tracing_subscriber::registry()
		.with(env_filter(level))
		.with(file_layer)
		.try_init()
		.context("failed to install the log subscriber")?;

	Ok(LoggingGuard {
		_file_guard: file_guard,
		path,
	})
}

fn env_filter(level: &str) -> EnvFilter {
	EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(level))
		.unwrap_or_else(|_| EnvFilter::new("info"))
}

fn split_log_path(path: &Path) -> Result<(PathBuf, &std::ffi::OsStr)> {
	let name = path
		.file_name()
		.with_context(|| format!("log file path {} has no file name", path.display()))?;
	let dir = path
		.parent()
		.filter(|parent| !parent.as_os_str().is_empty())
		.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
	Ok((dir, name))
}
