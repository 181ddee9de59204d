//! whichkey - leader-key command launcher
//!
//! This crate resolves a stream of key events into command selections through
//! a tree of named menus, in the style of which-key: press the leader key,
//! then narrow down key by key until a command runs.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod executor;
pub mod focus;
pub mod keymap;
pub mod render;
pub mod runtime;
pub mod tracing;

// Re-export commonly used types
pub use config::AppConfig;
pub use keymap::{Command, KeyEvent, KeyToken, Menu, Node, Resolver, ResolverConfig, Signal};
