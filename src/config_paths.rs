//! Where the launcher keeps its files
//!
//! ```text
//! <config dir>/
//!   config.yaml    launcher settings (AppConfig)
//!   keymap.yaml    user menu, replaces the built-in one
//!   logs/          daily rotated whichkey.log files
//! ```
//!
//! `<config dir>` is `$XDG_CONFIG_HOME/whichkey`, falling back to
//! `~/.config/whichkey`; on Windows it is `%APPDATA%\whichkey`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "whichkey";

/// Directory holding config, keymap and logs; `None` without a home directory
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
    }
}

/// Launcher settings read by `AppConfig::load`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// User menu picked up by `load_keymap` when no `--keymap` is given
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn create_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the config directory if needed and return it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    create_dir(&dir)?;
    Ok(dir)
}

/// Create the log directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join("logs");
    create_dir(&logs)?;
    Ok(logs)
}
