//! Command-line argument parsing for the launcher
//!
//! Supports:
//! - Alternate config and keymap files
//! - Reading key events from a script file instead of stdin
//! - Dry-run mode and menu dumps for checking a keymap

use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

/// A leader-key command launcher
#[derive(Parser, Debug)]
#[command(name = "whichkey", version, about = "A leader-key command launcher")]
pub struct CliArgs {
    /// Config file (default: ~/.config/whichkey/config.yaml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keymap file (default: ~/.config/whichkey/keymap.yaml, else built-in)
    #[arg(short = 'k', long, value_name = "FILE")]
    pub keymap: Option<PathBuf>,

    /// Read key events from FILE instead of stdin
    #[arg(short = 'e', long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Print selected commands instead of running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the menu tree as JSON and exit
    #[arg(long)]
    pub dump_menu: bool,

    /// Close an idle menu after N milliseconds (0 = never)
    #[arg(long, value_name = "N")]
    pub auto_close_ms: Option<u64>,
}

impl CliArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_to(&self, config: &mut AppConfig) {
        if self.dry_run {
            config.dry_run = true;
        }
        if let Some(ms) = self.auto_close_ms {
            config.auto_close_ms = ms;
        }
    }
}
