//! Line-oriented key event scripts
//!
//! Each non-empty line holds one action and one key:
//!
//! ```text
//! # open the git menu and show the status
//! tap space
//! press g
//! release g
//! tap s
//! ```
//!
//! `tap` expands to a press followed by a release.

use std::fmt;

use crate::keymap::{parse_key_token, KeyEvent, KeymapError};

/// Parse one script line into the events it stands for
///
/// Blank lines and `#` comments yield no events.
pub fn parse_event_line(line: &str) -> Result<Vec<KeyEvent>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Vec::new());
    }

    let (action, key) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| InputError::MissingKey(line.to_string()))?;
    let token = parse_key_token(key.trim()).map_err(InputError::Key)?;

    match action.to_lowercase().as_str() {
        "press" | "down" => Ok(vec![KeyEvent::press(token)]),
        "release" | "up" => Ok(vec![KeyEvent::release(token)]),
        "tap" => Ok(vec![KeyEvent::press(token), KeyEvent::release(token)]),
        _ => Err(InputError::UnknownAction(action.to_string())),
    }
}

/// Errors in an event script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    MissingKey(String),
    UnknownAction(String),
    Key(KeymapError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::MissingKey(line) => write!(f, "Missing key in '{}'", line),
            InputError::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            InputError::Key(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InputError {}
