//! Core types for the keymap system: KeyToken, Modifiers, KeyEvent

use std::fmt;

use serde::{Serialize, Serializer};

/// A modifier key
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierKey {
    Ctrl,
    Shift,
    Alt,
    /// Win on Windows, Super on Linux, Cmd on macOS
    Win,
}

impl ModifierKey {
    pub const ALL: [ModifierKey; 4] = [
        ModifierKey::Ctrl,
        ModifierKey::Shift,
        ModifierKey::Alt,
        ModifierKey::Win,
    ];

    const fn bit(self) -> u8 {
        match self {
            ModifierKey::Ctrl => 0b0001,
            ModifierKey::Shift => 0b0010,
            ModifierKey::Alt => 0b0100,
            ModifierKey::Win => 0b1000,
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKey::Ctrl => write!(f, "Ctrl"),
            ModifierKey::Shift => write!(f, "Shift"),
            ModifierKey::Alt => write!(f, "Alt"),
            ModifierKey::Win => write!(f, "Win"),
        }
    }
}

/// A named, non-printable key
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialKey {
    Space,
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,

    // Arrow keys
    Up,
    Down,
    Left,
    Right,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    // Function keys
    F(u8), // F1-F24
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialKey::Space => write!(f, "Space"),
            SpecialKey::Escape => write!(f, "Esc"),
            SpecialKey::Enter => write!(f, "Enter"),
            SpecialKey::Tab => write!(f, "Tab"),
            SpecialKey::Backspace => write!(f, "Backspace"),
            SpecialKey::Delete => write!(f, "Delete"),
            SpecialKey::Up => write!(f, "Up"),
            SpecialKey::Down => write!(f, "Down"),
            SpecialKey::Left => write!(f, "Left"),
            SpecialKey::Right => write!(f, "Right"),
            SpecialKey::Home => write!(f, "Home"),
            SpecialKey::End => write!(f, "End"),
            SpecialKey::PageUp => write!(f, "PageUp"),
            SpecialKey::PageDown => write!(f, "PageDown"),
            SpecialKey::Insert => write!(f, "Insert"),
            SpecialKey::F(n) => write!(f, "F{}", n),
        }
    }
}

/// Semantic identity of one logical key, independent of the capture backend
///
/// Ordering is total and stable: characters (by code point) sort before
/// special keys, which sort before modifiers. Menus list their entries in
/// this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyToken {
    /// A printable character, case preserved as captured
    Char(char),
    Special(SpecialKey),
    Modifier(ModifierKey),
}

impl KeyToken {
    pub const SPACE: KeyToken = KeyToken::Special(SpecialKey::Space);
    pub const ESCAPE: KeyToken = KeyToken::Special(SpecialKey::Escape);
    pub const CTRL: KeyToken = KeyToken::Modifier(ModifierKey::Ctrl);
    pub const SHIFT: KeyToken = KeyToken::Modifier(ModifierKey::Shift);
    pub const ALT: KeyToken = KeyToken::Modifier(ModifierKey::Alt);
    pub const WIN: KeyToken = KeyToken::Modifier(ModifierKey::Win);

    /// Check if this token is a modifier key
    #[inline]
    pub const fn is_modifier(self) -> bool {
        matches!(self, KeyToken::Modifier(_))
    }

    /// The modifier this token names, if any
    #[inline]
    pub const fn modifier(self) -> Option<ModifierKey> {
        match self {
            KeyToken::Modifier(m) => Some(m),
            _ => None,
        }
    }
}

impl From<char> for KeyToken {
    fn from(c: char) -> Self {
        KeyToken::Char(c)
    }
}

impl From<SpecialKey> for KeyToken {
    fn from(key: SpecialKey) -> Self {
        KeyToken::Special(key)
    }
}

impl From<ModifierKey> for KeyToken {
    fn from(key: ModifierKey) -> Self {
        KeyToken::Modifier(key)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Char(c) => write!(f, "{}", c),
            KeyToken::Special(key) => write!(f, "{}", key),
            KeyToken::Modifier(key) => write!(f, "{}", key),
        }
    }
}

impl Serialize for KeyToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Set of held modifier keys as a bitfield
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);

    /// Mark a modifier as held
    #[inline]
    pub fn insert(&mut self, key: ModifierKey) {
        self.0 |= key.bit();
    }

    /// Mark a modifier as released
    #[inline]
    pub fn remove(&mut self, key: ModifierKey) {
        self.0 &= !key.bit();
    }

    #[inline]
    pub const fn contains(self, key: ModifierKey) -> bool {
        self.0 & key.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the held modifiers in their natural order
    pub fn iter(self) -> impl Iterator<Item = ModifierKey> {
        ModifierKey::ALL
            .into_iter()
            .filter(move |key| self.contains(*key))
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", parts.join("+"))
    }
}

/// Whether a key went down or up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// One event from the capture source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub token: KeyToken,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    pub fn press(token: impl Into<KeyToken>) -> Self {
        Self {
            token: token.into(),
            kind: KeyEventKind::Press,
        }
    }

    pub fn release(token: impl Into<KeyToken>) -> Self {
        Self {
            token: token.into(),
            kind: KeyEventKind::Release,
        }
    }
}
