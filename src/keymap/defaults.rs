//! Default menu for the launcher
//!
//! The default menu is loaded from keymap.yaml at crate root (embedded at
//! compile time), or falls back to a small hardcoded menu.

use std::path::Path;

use super::config::{load_keymap_file, parse_keymap_yaml, KeymapError, Registration};
use super::node::{Command, Menu};
use super::types::KeyToken;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Get the embedded default keymap YAML as a string
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load the menu registrations to use at startup
///
/// Sources, first match wins (files are never merged, so a key defined
/// twice is always a setup error rather than a silent override):
/// 1. `explicit`, if given (errors are returned)
/// 2. User keymap at ~/.config/whichkey/keymap.yaml, if it exists
/// 3. Embedded default keymap
pub fn load_keymap(explicit: Option<&Path>) -> Result<Vec<Registration>, KeymapError> {
    if let Some(path) = explicit {
        let registrations = load_keymap_file(path)?;
        tracing::info!(
            "Loaded keymap from {} ({} entries)",
            path.display(),
            registrations.len()
        );
        return Ok(registrations);
    }

    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            let registrations = load_keymap_file(&user_path)?;
            tracing::info!(
                "Loaded user keymap from {} ({} entries)",
                user_path.display(),
                registrations.len()
            );
            return Ok(registrations);
        }
    }

    Ok(load_default_keymap())
}

/// Registrations from the embedded keymap, or hardcoded defaults if it is broken
pub fn load_default_keymap() -> Vec<Registration> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(registrations) => {
            tracing::info!(
                "Loaded embedded default keymap ({} entries)",
                registrations.len()
            );
            registrations
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Hardcoded fallback menu
pub fn default_bindings() -> Vec<Registration> {
    let apps = KeyToken::Char('o');
    vec![
        Registration::new(vec![], Command::new('a', "Menu A", "echo 'Menu A'")),
        Registration::new(vec![], Menu::new(apps, "Open")),
        Registration::new(
            vec![apps],
            Command::new('t', "Terminal", "x-terminal-emulator"),
        ),
        Registration::new(vec![apps], Command::new('b', "Browser", "xdg-open about:blank")),
    ]
}
