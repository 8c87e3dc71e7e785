//! Tracing setup for the arena binary.
//!
//! Everything goes to stderr. When file logging is on, a non-blocking copy is
//! also written to `<log root>/<session id>/arena.log`; the returned guard
//! must be held until exit so buffered lines are flushed.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ArenaConfig;

pub const LOG_FILE: &str = "arena.log";

/// Installs the global subscriber.
///
/// # Returns
///
/// The resolved session id and the file writer guard, if a file layer was set up.
pub fn setup_logging(config: &ArenaConfig) -> Result<(String, Option<WorkerGuard>)> {
    let session_id = config.session_id.clone().unwrap_or_else(generate_session_id);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard, session_log_dir) = if config.file_logging {
        let session_log_dir = log_root(config).join(&session_id);
        std::fs::create_dir_all(&session_log_dir).with_context(|| {
            format!("Failed to create log directory: {}", session_log_dir.display())
        })?;

        let appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);

        (Some(layer), Some(guard), Some(session_log_dir))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized: session={}", session_id);
    if let Some(dir) = session_log_dir {
        tracing::info!("Log file: {}/{}", dir.display(), LOG_FILE);
    }

    Ok((session_id, guard))
}

/// `ARENA_LOG_DIR` if set, else the platform data dir.
///
/// - Linux: `~/.local/share/arena/logs`
/// - macOS: `~/Library/Application Support/arena/logs`
/// - Windows: `%APPDATA%\arena\logs`
/// - Fallback: `./arena_logs`
pub fn log_root(config: &ArenaConfig) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }

    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./arena_logs"))
}

fn generate_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{}", timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_dir_wins() {
        let config = ArenaConfig {
            log_dir: Some(PathBuf::from("/var/log/arena")),
            ..ArenaConfig::default()
        };
        assert_eq!(log_root(&config), PathBuf::from("/var/log/arena"));
    }

    #[test]
    fn generated_session_ids_are_prefixed() {
        let id = generate_session_id();
        let stamp = id.strip_prefix("session_").expect("prefix");
        assert!(stamp.parse::<u64>().is_ok());
    }
}
