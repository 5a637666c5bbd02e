//! Configuration management for akinator.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::game::{GameOptions, Language, DEFAULT_USER_AGENT};
use crate::session::{FileStore, DEFAULT_STORE_PATH, DEFAULT_TTL_SECS};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Game settings.
    pub game: GameSection,
    /// HTTP settings.
    pub http: HttpSection,
    /// Session store settings.
    pub cache: CacheSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Game configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSection {
    /// Language code or English name.
    pub language: Language,
    /// Child-safe characters only.
    pub child_mode: bool,
}

/// HTTP configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSection {
    /// Replaces the regional `akinator.com` host.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 120,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Session store configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    /// Store file location.
    pub path: PathBuf,
    /// Seconds a record stays readable after its last write.
    pub ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            ttl_secs: DEFAULT_TTL_SECS as u64,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable values are ignored.
    pub fn apply_env(&mut self) {
        if let Ok(language) = std::env::var("AKINATOR_LANGUAGE") {
            if let Ok(language) = language.parse() {
                self.game.language = language;
            }
        }

        if let Ok(child_mode) = std::env::var("AKINATOR_CHILD_MODE") {
            match child_mode.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.game.child_mode = true,
                "0" | "false" | "no" | "off" => self.game.child_mode = false,
                _ => {}
            }
        }

        if let Ok(url) = std::env::var("AKINATOR_BASE_URL") {
            if !url.is_empty() {
                self.http.base_url = Some(url);
            }
        }

        if let Ok(path) = std::env::var("AKINATOR_CACHE_PATH") {
            if !path.is_empty() {
                self.cache.path = PathBuf::from(path);
            }
        }

        if let Ok(level) = std::env::var("AKINATOR_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(language) = args.language {
            self.game.language = language;
        }

        if args.child_mode {
            self.game.child_mode = true;
        }

        if let Some(ref path) = args.cache {
            self.cache.path = path.clone();
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env();
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Reject values no engine can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("http.timeout_secs", "0".into()));
        }
        if self.ttl().is_none() {
            return Err(ConfigError::InvalidValue(
                "cache.ttl_secs",
                self.cache.ttl_secs.to_string(),
            ));
        }
        if let Some(ref url) = self.http.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue("http.base_url", url.clone()));
            }
        }
        Ok(())
    }

    /// Record lifetime, if representable.
    fn ttl(&self) -> Option<TimeDelta> {
        i64::try_from(self.cache.ttl_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(TimeDelta::try_seconds)
    }

    /// Settings for a game engine.
    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            language: self.game.language,
            child_mode: self.game.child_mode,
            base_url: self.http.base_url.clone(),
            timeout: Duration::from_secs(self.http.timeout_secs),
            user_agent: self.http.user_agent.clone(),
        }
    }

    /// Open the configured session store.
    pub fn open_store(&self) -> crate::Result<FileStore> {
        let store = FileStore::open(&self.cache.path)?;
        Ok(match self.ttl() {
            Some(ttl) => store.with_ttl(ttl),
            None => store,
        })
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// A setting holds a value that cannot be used.
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidValue(name, value) => write!(f, "invalid value for {}: '{}'", name, value),
        }
    }
}

impl std::error::Error for ConfigError {}
