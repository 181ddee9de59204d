//! Launcher configuration persistence
//!
//! Stores user preferences in `~/.config/whichkey/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::keymap::{parse_key_token, InhibitRule, KeymapError, ResolverConfig};

/// Launcher configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key that opens the root menu (e.g., "space", "f12")
    #[serde(default = "default_leader")]
    pub leader: String,

    /// Key that closes an open menu
    #[serde(default = "default_quit")]
    pub quit: String,

    /// Modifiers plus one key that shut the launcher down when released
    #[serde(default = "default_stop")]
    pub stop: Vec<String>,

    /// Close an idle menu after this many milliseconds (0 = never)
    #[serde(default = "default_auto_close_ms")]
    pub auto_close_ms: u64,

    /// Windows in which the menu never opens
    #[serde(default)]
    pub inhibit: Vec<InhibitRule>,

    /// Shell command printing the focused window title
    #[serde(default)]
    pub focus_command: Option<String>,

    /// Print selected commands instead of running them
    #[serde(default)]
    pub dry_run: bool,
}

fn default_leader() -> String {
    "space".to_string()
}

fn default_quit() -> String {
    "esc".to_string()
}

fn default_stop() -> Vec<String> {
    vec!["ctrl".to_string(), "c".to_string()]
}

fn default_auto_close_ms() -> u64 {
    3000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            leader: default_leader(),
            quit: default_quit(),
            stop: default_stop(),
            auto_close_ms: default_auto_close_ms(),
            inhibit: Vec::new(),
            focus_command: None,
            dry_run: false,
        }
    }
}

impl AppConfig {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from `path`
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| ConfigError::Io("No config directory available".to_string()))?;
        self.save_to(&path)
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            ConfigError::Io(format!("Failed to write config to {}: {}", path.display(), e))
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Resolve the key names into the resolver's key policy
    pub fn resolver_config(&self) -> Result<ResolverConfig, ConfigError> {
        let leader = parse_key_token(&self.leader)?;
        let quit = parse_key_token(&self.quit)?;
        let stop = self
            .stop
            .iter()
            .map(|key| parse_key_token(key))
            .collect::<Result<Vec<_>, _>>()?;

        if leader == quit {
            return Err(ConfigError::Invalid(format!(
                "leader and quit are both '{}'",
                leader
            )));
        }
        // Idle auto-close injects a press of quit with no release
        if quit.is_modifier() {
            return Err(ConfigError::Invalid(format!(
                "quit key '{}' cannot be a modifier",
                quit
            )));
        }
        Ok(ResolverConfig::new(leader, quit, stop))
    }

    /// Idle timeout for an open menu, if enabled
    pub fn auto_close(&self) -> Option<Duration> {
        (self.auto_close_ms > 0).then(|| Duration::from_millis(self.auto_close_ms))
    }
}

/// Errors that can occur when loading the launcher config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Key(KeymapError),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Key(e) => write!(f, "{}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<KeymapError> for ConfigError {
    fn from(e: KeymapError) -> Self {
        ConfigError::Key(e)
    }
}
