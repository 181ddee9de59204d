//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into menu registrations.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::node::{Command, Menu, Node, RegisterError};
use super::types::{KeyToken, ModifierKey, SpecialKey};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single entry from YAML
///
/// Entries with a `command` become commands, entries without one become menus.
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    /// Keys leading from the root menu to the menu holding this entry
    #[serde(default)]
    pub path: Vec<String>,
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub command: Option<String>,
}

/// A node together with where it should be registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub path: Vec<KeyToken>,
    pub node: Node,
}

impl Registration {
    pub fn new(path: Vec<KeyToken>, node: impl Into<Node>) -> Self {
        Self {
            path,
            node: node.into(),
        }
    }
}

/// Load registrations from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Registration>, KeymapError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KeymapError::IoError(format!("{}: {}", path.display(), e)))?;

    parse_keymap_yaml(&content)
}

/// Parse registrations from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Registration>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut registrations = Vec::with_capacity(config.bindings.len());
    for entry in config.bindings {
        let path = entry
            .path
            .iter()
            .map(|key| parse_key_token(key))
            .collect::<Result<Vec<_>, _>>()?;
        let key = parse_key_token(&entry.key)?;

        let node = match entry.command {
            Some(payload) => Node::Command(Command::new(key, &entry.description, &payload)),
            None => Node::Menu(Menu::new(key, &entry.description)),
        };
        registrations.push(Registration { path, node });
    }

    Ok(registrations)
}

/// Register everything into a fresh root menu, failing on the first conflict
pub fn build_menu(
    leader: KeyToken,
    registrations: impl IntoIterator<Item = Registration>,
) -> Result<Menu, KeymapError> {
    let mut root = Menu::root(leader);
    for registration in registrations {
        root.register(&registration.path, registration.node)?;
    }
    Ok(root)
}

/// Parse a key string like "space", "ctrl" or "a" into a KeyToken
///
/// A single character is taken literally, keeping its case. Names of special
/// keys and modifiers are matched case-insensitively.
pub fn parse_key_token(key: &str) -> Result<KeyToken, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(match c {
            ' ' => KeyToken::SPACE,
            '\t' => KeyToken::Special(SpecialKey::Tab),
            _ => KeyToken::Char(c),
        });
    }

    let name = key.trim().to_lowercase();
    if let Some(modifier) = parse_modifier(&name) {
        return Ok(KeyToken::Modifier(modifier));
    }
    parse_special(&name)
        .map(KeyToken::Special)
        .ok_or_else(|| KeymapError::InvalidKey(key.to_string()))
}

/// Modifier names, including left/right variants such as "ctrl_l" or "alt_gr"
fn parse_modifier(name: &str) -> Option<ModifierKey> {
    let base = name.split('_').next().unwrap_or(name);
    match base {
        "ctrl" | "control" => Some(ModifierKey::Ctrl),
        "shift" => Some(ModifierKey::Shift),
        "alt" | "option" | "opt" => Some(ModifierKey::Alt),
        "win" | "super" | "meta" | "cmd" => Some(ModifierKey::Win),
        _ => None,
    }
}

fn parse_special(name: &str) -> Option<SpecialKey> {
    let key = match name {
        "space" => SpecialKey::Space,
        "escape" | "esc" => SpecialKey::Escape,
        "enter" | "return" => SpecialKey::Enter,
        "tab" => SpecialKey::Tab,
        "backspace" | "back" => SpecialKey::Backspace,
        "delete" | "del" => SpecialKey::Delete,

        "up" | "arrowup" => SpecialKey::Up,
        "down" | "arrowdown" => SpecialKey::Down,
        "left" | "arrowleft" => SpecialKey::Left,
        "right" | "arrowright" => SpecialKey::Right,

        "home" => SpecialKey::Home,
        "end" => SpecialKey::End,
        "pageup" | "page_up" | "pgup" => SpecialKey::PageUp,
        "pagedown" | "page_down" | "pgdown" | "pgdn" => SpecialKey::PageDown,
        "insert" | "ins" => SpecialKey::Insert,

        _ => {
            // Function keys F1-F24
            let n: u8 = name.strip_prefix('f')?.parse().ok()?;
            if !(1..=24).contains(&n) {
                return None;
            }
            SpecialKey::F(n)
        }
    };
    Some(key)
}

impl FromStr for KeyToken {
    type Err = KeymapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_token(s)
    }
}

/// Errors that can occur when loading keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    Register(RegisterError),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::Register(e) => write!(f, "Invalid menu: {}", e),
        }
    }
}

impl std::error::Error for KeymapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeymapError::Register(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegisterError> for KeymapError {
    fn from(e: RegisterError) -> Self {
        KeymapError::Register(e)
    }
}
