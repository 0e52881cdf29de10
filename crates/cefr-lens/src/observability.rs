//! Logging setup: human-readable events on stderr plus an optional JSONL file.
//!
//! The file sink is chosen, first match wins, from:
//! 1. `CEFR_LENS_LOG_PATH`: an explicit file path
//! 2. `CEFR_LENS_LOG_DIR`: a directory for daily rolling files
//! 3. `log_dir` from configuration
//! 4. The platform data directory (`~/.local/share/cefr-lens/logs` on Linux)
//!
//! If none of those can be resolved, only stderr logging is installed.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_PATH_ENV: &str = "CEFR_LENS_LOG_PATH";
const LOG_DIR_ENV: &str = "CEFR_LENS_LOG_DIR";
const LOG_FILE_PREFIX: &str = "cefr-lens.jsonl";

/// Where JSONL log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A single named file.
    File(PathBuf),
    /// Daily rolling files in a directory.
    Directory(PathBuf),
}

/// Resolved observability settings.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File sink, if any.
    pub target: Option<LogTarget>,
}

impl ObservabilityConfig {
    /// Resolves the file sink from the environment, then `config_dir`, then
    /// the platform default.
    pub fn from_env_with_overrides(config_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let target = env_path.map(LogTarget::File).or_else(|| {
            env_dir
                .or(config_dir)
                .or_else(|| {
                    cefr_lens_core::config::user_data_local_dir()
                        .map(|dir| dir.join("logs").into_std_path_buf())
                })
                .map(LogTarget::Directory)
        });
        Self { target }
    }
}

/// Builds the event filter.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` gives `error`, `-v` gives
/// `debug`, `-vv` and beyond give `trace`, and the configured level applies
/// when no flag is passed.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(filter_directive(quiet, verbose, config_level))
}

fn filter_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive until
/// the process exits.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match config.target.as_ref().and_then(file_appender) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    Ok(guard)
}

fn file_appender(target: &LogTarget) -> Option<tracing_appender::rolling::RollingFileAppender> {
    match target {
        LogTarget::File(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty())?;
            let name = path.file_name()?;
            ensure_dir(dir)?;
            Some(tracing_appender::rolling::never(dir, name))
        }
        LogTarget::Directory(dir) => {
            ensure_dir(dir)?;
            Some(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
        }
    }
}

/// Creates `dir` if needed. A directory that cannot be created disables file
/// logging rather than failing the command.
fn ensure_dir(dir: &Path) -> Option<()> {
    std::fs::create_dir_all(dir).ok()
}
