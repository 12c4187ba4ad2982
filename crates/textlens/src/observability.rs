//! Logging setup: a human-readable stderr layer plus a JSONL file layer.
//!
//! File logging is best-effort. When no log directory can be determined or
//! created, the CLI keeps running with stderr logging only.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Explicit log file path; disables rotation.
const LOG_PATH_ENV: &str = "TEXTLENS_LOG_PATH";
/// Log directory; files rotate daily inside it.
const LOG_DIR_ENV: &str = "TEXTLENS_LOG_DIR";
/// File name (or rotation prefix) for JSONL logs.
const LOG_FILE_NAME: &str = "textlens.jsonl";

/// Where JSONL logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A single file, never rotated.
    File(PathBuf),
    /// Daily-rotated files in a directory.
    Directory(PathBuf),
}

/// Resolved logging destinations.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// JSONL log destination, if any.
    pub log_target: Option<LogTarget>,
}

impl ObservabilityConfig {
    /// Resolve the log destination.
    ///
    /// Precedence: `TEXTLENS_LOG_PATH`, then `TEXTLENS_LOG_DIR`, then the
    /// configured `log_dir`, then `<data-local-dir>/logs`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let log_target = env_path.map(LogTarget::File).or_else(|| {
            env_dir
                .or(config_log_dir)
                .or_else(default_log_dir)
                .map(LogTarget::Directory)
        });
        Self { log_target }
    }
}

/// `<data-local-dir>/logs`, e.g. `~/.local/share/textlens/logs` on Linux.
fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "textlens")
        .map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Keeps the non-blocking file writer alive; drop it at exit to flush.
#[derive(Debug)]
pub struct ObservabilityGuard {
    _file: Option<WorkerGuard>,
}

/// Build the log filter.
///
/// `RUST_LOG` wins when set. Otherwise `-q` means errors only, `-v` means
/// debug, `-vv` and beyond mean trace, and no flag uses the configured level.
pub fn env_filter(quiet: bool, verbose: u8, configured_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, configured_level))
}

fn level_directive(quiet: bool, verbose: u8, configured_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => configured_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<ObservabilityGuard> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let mut file_error = None;
    let (file_layer, file_guard) = match config.log_target.as_ref().map(file_writer) {
        Some(Ok(writer)) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(writer);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_current_span(true)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        Some(Err(err)) => {
            file_error = Some(err);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(err) = file_error {
        tracing::debug!("file logging disabled: {err:#}");
    }

    Ok(ObservabilityGuard { _file: file_guard })
}

fn file_writer(target: &LogTarget) -> anyhow::Result<RollingFileAppender> {
    let (dir, prefix, rotation) = match target {
        LogTarget::File(path) => (
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new(".")),
            path.file_name().map_or_else(
                || LOG_FILE_NAME.to_string(),
                |n| n.to_string_lossy().into_owned(),
            ),
            Rotation::NEVER,
        ),
        LogTarget::Directory(dir) => (dir.as_path(), LOG_FILE_NAME.to_string(), Rotation::DAILY),
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(prefix)
        .build(dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_beats_directories() {
        let config = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/a.jsonl")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(
            config.log_target,
            Some(LogTarget::File(PathBuf::from("/tmp/a.jsonl")))
        );
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let config = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(
            config.log_target,
            Some(LogTarget::Directory(PathBuf::from("/tmp/env")))
        );
    }

    #[test]
    fn config_dir_used_without_env() {
        let config = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/tmp/config")));
        assert_eq!(
            config.log_target,
            Some(LogTarget::Directory(PathBuf::from("/tmp/config")))
        );
    }

    #[test]
    fn verbosity_flags_pick_level() {
        assert_eq!(level_directive(true, 2, "info"), "error");
        assert_eq!(level_directive(false, 0, "warn"), "warn");
        assert_eq!(level_directive(false, 1, "warn"), "debug");
        assert_eq!(level_directive(false, 3, "warn"), "trace");
    }

    #[test]
    fn file_writer_creates_missing_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        file_writer(&LogTarget::Directory(dir.clone())).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn explicit_file_keeps_its_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("run.jsonl");
        file_writer(&LogTarget::File(path.clone())).unwrap();
        assert!(path.is_file());
    }
}
