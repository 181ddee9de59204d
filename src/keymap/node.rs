//! Menu trie: menus and the commands they lead to
//!
//! A [`Menu`] owns its children in a map keyed by [`KeyToken`], so every key
//! is unique within one level and iteration follows the keys' natural order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::types::KeyToken;

/// Description given to menus created implicitly while registering a path
pub const PREFIX_DESCRIPTION: &str = "Prefix";

/// A leaf of the trie carrying an opaque payload for the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub key: KeyToken,
    pub description: String,
    pub payload: String,
}

impl Command {
    pub fn new(key: impl Into<KeyToken>, description: &str, payload: &str) -> Self {
        Self {
            key: key.into(),
            description: description.to_string(),
            payload: payload.to_string(),
        }
    }
}

/// A named group of further choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub key: KeyToken,
    pub description: String,
    #[serde(rename = "entries", serialize_with = "serialize_children")]
    children: BTreeMap<KeyToken, Node>,
}

/// One entry of the trie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Command(Command),
    Menu(Menu),
}

impl Node {
    pub fn key(&self) -> KeyToken {
        match self {
            Node::Command(command) => command.key,
            Node::Menu(menu) => menu.key,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Node::Command(command) => &command.description,
            Node::Menu(menu) => &menu.description,
        }
    }

    pub fn is_menu(&self) -> bool {
        matches!(self, Node::Menu(_))
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match self {
            Node::Menu(menu) => Some(menu),
            Node::Command(_) => None,
        }
    }
}

impl From<Command> for Node {
    fn from(command: Command) -> Self {
        Node::Command(command)
    }
}

impl From<Menu> for Node {
    fn from(menu: Menu) -> Self {
        Node::Menu(menu)
    }
}

impl Menu {
    /// Create an empty menu
    pub fn new(key: impl Into<KeyToken>, description: &str) -> Self {
        Self {
            key: key.into(),
            description: description.to_string(),
            children: BTreeMap::new(),
        }
    }

    /// Create the root menu, reached by pressing the leader key
    pub fn root(leader: KeyToken) -> Self {
        Self::new(leader, "Root menu")
    }

    fn prefix(key: KeyToken) -> Self {
        Self::new(key, PREFIX_DESCRIPTION)
    }

    /// Add a direct child (builder pattern)
    pub fn with(mut self, node: impl Into<Node>) -> Result<Self, RegisterError> {
        self.register(&[], node.into())?;
        Ok(self)
    }

    /// Register `node` under the menu reached by following `path` from here
    ///
    /// Missing menus along the path are created with the description
    /// [`PREFIX_DESCRIPTION`]. On error the trie is left untouched.
    pub fn register(&mut self, path: &[KeyToken], node: Node) -> Result<(), RegisterError> {
        self.check_register(path, node.key())?;

        let mut menu = self;
        for (depth, token) in path.iter().enumerate() {
            menu = match menu
                .children
                .entry(*token)
                .or_insert_with(|| Node::Menu(Menu::prefix(*token)))
            {
                Node::Menu(child) => child,
                Node::Command(_) => {
                    return Err(RegisterError::TypeMismatch {
                        path: path[..=depth].to_vec(),
                    })
                }
            };
        }

        menu.children.insert(node.key(), node);
        Ok(())
    }

    /// Validate a registration without mutating anything
    fn check_register(&self, path: &[KeyToken], key: KeyToken) -> Result<(), RegisterError> {
        let mut menu = self;
        for (depth, token) in path.iter().enumerate() {
            match menu.children.get(token) {
                Some(Node::Menu(child)) => menu = child,
                Some(Node::Command(_)) => {
                    return Err(RegisterError::TypeMismatch {
                        path: path[..=depth].to_vec(),
                    })
                }
                // The rest of the path gets created fresh, so nothing can collide
                None => return Ok(()),
            }
        }

        if menu.children.contains_key(&key) {
            return Err(RegisterError::DuplicateKey {
                path: path.to_vec(),
                key,
            });
        }
        Ok(())
    }

    /// Look up a direct child by key
    pub fn lookup_child(&self, token: &KeyToken) -> Option<&Node> {
        self.children.get(token)
    }

    /// Children in natural key order
    pub fn children_sorted(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Follow `path` through nested menus
    pub fn menu_at(&self, path: &[KeyToken]) -> Option<&Menu> {
        path.iter()
            .try_fold(self, |menu, token| menu.lookup_child(token)?.as_menu())
    }

    /// Read-only view of this menu's entries for renderers
    pub fn snapshot(&self) -> MenuSnapshot {
        MenuSnapshot {
            key: self.key,
            description: self.description.clone(),
            entries: self
                .children_sorted()
                .map(|node| MenuEntry {
                    key: node.key(),
                    description: node.description().to_string(),
                    submenu: node.is_menu(),
                })
                .collect(),
        }
    }
}

fn serialize_children<S: Serializer>(
    children: &BTreeMap<KeyToken, Node>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(children.values())
}

/// Flat copy of a menu level as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSnapshot {
    pub key: KeyToken,
    pub description: String,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub key: KeyToken,
    pub description: String,
    /// Whether selecting this entry opens another menu
    pub submenu: bool,
}

/// Errors raised while building the menu trie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// A node with this key already exists at `path`
    DuplicateKey { path: Vec<KeyToken>, key: KeyToken },
    /// The last token of `path` names a command, not a menu
    TypeMismatch { path: Vec<KeyToken> },
}

fn display_path(path: &[KeyToken]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for RegisterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterError::DuplicateKey { path, key } => write!(
                f,
                "Duplicate key '{}' in menu {}",
                key,
                display_path(path)
            ),
            RegisterError::TypeMismatch { path } => {
                write!(f, "Key sequence {} is a command, not a menu", display_path(path))
            }
        }
    }
}

impl std::error::Error for RegisterError {}
