//! Logging system initialization
//!
//! Sets up the tracing subscriber from the `[logging]` section of the
//! static configuration.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;
use crate::errors::{AppError, Result};

/// Where log lines go, resolved from `logging.file` / `logging.enable_rotation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// 按天滚动，保留 `max_backups` 份
    Rolling {
        dir: String,
        prefix: String,
        max_backups: usize,
    },
    File(String),
}

impl LogTarget {
    pub fn from_config(logging: &LoggingConfig) -> Self {
        match logging.file.as_deref() {
            Some(file) if !file.is_empty() && logging.enable_rotation => {
                let path = Path::new(file);
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
                let filename = path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("event-insight.log");
                LogTarget::Rolling {
                    dir: dir.to_string_lossy().into_owned(),
                    prefix: filename.trim_end_matches(".log").to_string(),
                    max_backups: logging.max_backups as usize,
                }
            }
            Some(file) if !file.is_empty() => LogTarget::File(file.to_string()),
            _ => LogTarget::Stdout,
        }
    }

    fn is_console(&self) -> bool {
        matches!(self, LogTarget::Stdout)
    }
}

/// Initialize logging system based on configuration
///
/// **Note**: call once, after the configuration has been loaded.
///
/// The returned `WorkerGuard` must be kept alive for the duration of the
/// program so that buffered log lines are flushed.
pub fn init_logging(logging: &LoggingConfig) -> Result<WorkerGuard> {
    let target = LogTarget::from_config(logging);

    let writer: Box<dyn std::io::Write + Send + Sync> = match &target {
        LogTarget::Rolling {
            dir,
            prefix,
            max_backups,
        } => {
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(*max_backups)
                .build(dir)
                .map_err(|e| {
                    AppError::file_operation(format!(
                        "Failed to create rolling log appender in {}: {}",
                        dir, e
                    ))
                })?;
            Box::new(appender)
        }
        LogTarget::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    AppError::file_operation(format!("Failed to open log file {}: {}", path, e))
                })?;
            Box::new(file)
        }
        LogTarget::Stdout => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&logging.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(target.is_console());

    let result = if logging.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };

    // 已有全局 subscriber 时（例如测试中重复初始化）保持原状
    if let Err(e) = result {
        eprintln!("[WARN] Logging already initialized: {}", e);
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_logs_to_stdout() {
        let logging = LoggingConfig::default();
        assert_eq!(LogTarget::from_config(&logging), LogTarget::Stdout);

        let logging = LoggingConfig {
            file: Some(String::new()),
            ..LoggingConfig::default()
        };
        assert_eq!(LogTarget::from_config(&logging), LogTarget::Stdout);
    }

    #[test]
    fn test_rotation_splits_dir_and_prefix() {
        let logging = LoggingConfig {
            file: Some("logs/api.log".to_string()),
            max_backups: 7,
            ..LoggingConfig::default()
        };
        assert_eq!(
            LogTarget::from_config(&logging),
            LogTarget::Rolling {
                dir: "logs".to_string(),
                prefix: "api".to_string(),
                max_backups: 7,
            }
        );
    }

    #[test]
    fn test_bare_filename_rotates_in_current_dir() {
        let logging = LoggingConfig {
            file: Some("api.log".to_string()),
            ..LoggingConfig::default()
        };
        match LogTarget::from_config(&logging) {
            LogTarget::Rolling { dir, .. } => assert_eq!(dir, "."),
            other => panic!("unexpected target {:?}", other),
        }
    }

    #[test]
    fn test_rotation_disabled_appends_to_file() {
        let logging = LoggingConfig {
            file: Some("api.log".to_string()),
            enable_rotation: false,
            ..LoggingConfig::default()
        };
        assert_eq!(
            LogTarget::from_config(&logging),
            LogTarget::File("api.log".to_string())
        );
    }
}
