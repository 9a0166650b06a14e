use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::{log_dir, CliConfig, LogLevel};

/// Crates whose events follow the configured level. Everything else stays at warn.
const OWN_TARGETS: [&str; 3] = ["glacial", "glacial_settings", "glacial_theme"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stderr,
}

impl LogMode {
    pub fn from_config(log_to_file: bool) -> Self {
        if log_to_file {
            LogMode::File
        } else {
            LogMode::Stderr
        }
    }
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Install the global subscriber. `RUST_LOG`, when set, replaces the
/// configured directives entirely.
pub fn init(config: &CliConfig, cli_override: Option<LogLevel>) -> LogGuard {
    let level = cli_override.unwrap_or(config.log_level);
    let Some(level) = level.as_tracing_level() else {
        return LogGuard { _guard: None };
    };

    let (layer, guard) = match LogMode::from_config(config.log_to_file) {
        LogMode::File => match file_layer() {
            Some((layer, guard)) => (layer, Some(guard)),
            None => (stderr_layer(), None),
        },
        LogMode::Stderr => (stderr_layer(), None),
    };

    if tracing_subscriber::registry()
        .with(layer)
        .with(build_env_filter(level))
        .try_init()
        .is_err()
    {
        eprintln!("Warning: a global logger was already installed");
    }

    LogGuard { _guard: guard }
}

fn filter_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(OWN_TARGETS.iter().map(|target| format!("{}={}", target, level)))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_env_filter(level: Level) -> EnvFilter {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::try_new(filter_directives(level)).unwrap_or_else(|e| {
        eprintln!("Warning: bad log filter ({}), using warn", e);
        EnvFilter::new("warn")
    })
}

fn file_layer() -> Option<(BoxedLayer, WorkerGuard)> {
    let log_dir = log_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "Warning: cannot create log directory {}, logging to stderr: {}",
            log_dir.display(),
            e
        );
        return None;
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("glacial")
        .filename_suffix("log")
        .max_log_files(7)
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .boxed();

    Some((layer, guard))
}

/// Short lines for interactive use; command output goes to stdout.
fn stderr_layer() -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .compact()
        .boxed()
}
