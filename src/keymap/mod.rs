//! Leader-key menu resolution
//!
//! This module turns a stream of key events into command selections:
//! - Menus and commands form a trie, one key per level
//! - Pressing the leader key opens the root menu
//! - Each further key narrows into a submenu or selects a command
//! - Hooks let the application veto activation and render the menu
//!
//! # Architecture
//!
//! ```text
//! capture → KeyEvent → Resolver::on_event() → show/update hooks → renderer
//!                                           → Command → Executor
//! ```
//!
//! # Building a Menu
//!
//! ```ignore
//! let mut root = Menu::root(KeyToken::SPACE);
//! root.register(&[], Command::new('a', "Menu A", "echo 'Menu A'").into())?;
//! root.register(&[KeyToken::Char('g')], Command::new('s', "Status", "git status").into())?;
//!
//! let mut resolver = Resolver::new(ResolverConfig::default(), root, executor);
//! resolver.on_event(KeyEvent::press(KeyToken::SPACE));
//! ```

mod command;
mod config;
mod context;
mod defaults;
mod hooks;
mod node;
mod resolver;
mod types;

pub use command::{execute, Executor};
pub use config::{
    build_menu, load_keymap_file, parse_key_token, parse_keymap_yaml, KeymapError, Registration,
};
pub use context::{FocusInspector, InhibitContext, InhibitRule, NoFocus, TitleMatch};
pub use defaults::{default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap};
pub use hooks::{HookRegistry, InhibitHook, ShowHook, UpdateHook};
pub use node::{
    Command, Menu, MenuEntry, MenuSnapshot, Node, RegisterError, PREFIX_DESCRIPTION,
};
pub use resolver::{Resolver, ResolverConfig, Signal};
pub use types::{KeyEvent, KeyEventKind, KeyToken, ModifierKey, Modifiers, SpecialKey};
