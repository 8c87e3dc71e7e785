//! Arena client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Settings for one arena session.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaConfig {
    /// Wall-clock spacing between ticks.
    pub tick_ms: u64,
    /// Number of ticks to run before exiting.
    pub ticks: u32,
    /// JSON scenario file. `None` runs the built-in skirmish.
    pub scenario: Option<PathBuf>,
    /// Root for session log directories. `None` uses the platform data dir.
    pub log_dir: Option<PathBuf>,
    /// Session identifier. `None` generates `session_<unix seconds>`.
    pub session_id: Option<String>,
    /// Write a log file next to stderr output.
    pub file_logging: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            ticks: 60,
            scenario: None,
            log_dir: None,
            session_id: None,
            file_logging: true,
        }
    }
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_TICK_MS` - Milliseconds between ticks (default: 100, min 1)
    /// - `ARENA_TICKS` - Ticks to run (default: 60)
    /// - `ARENA_SCENARIO` - Path to a JSON scenario (default: built-in skirmish)
    /// - `ARENA_LOG_DIR` - Log root (default: platform-specific)
    /// - `ARENA_SESSION_ID` - Session identifier (default: auto-generated)
    /// - `ARENA_FILE_LOG` - Write a session log file (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(tick_ms) = read_env::<u64>("ARENA_TICK_MS") {
            config.tick_ms = tick_ms.max(1);
        }

        if let Some(ticks) = read_env::<u32>("ARENA_TICKS") {
            config.ticks = ticks;
        }

        config.scenario = env::var("ARENA_SCENARIO").ok().map(PathBuf::from);
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);
        config.session_id = env::var("ARENA_SESSION_ID").ok();

        if let Some(enabled) = read_env::<bool>("ARENA_FILE_LOG") {
            config.file_logging = enabled;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
