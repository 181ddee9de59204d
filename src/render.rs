//! Terminal renderer for the which-key menu
//!
//! Driven entirely by the resolver's show/update hooks. Entries are laid out
//! column by column in a grid of at most [`MAX_COLUMNS`] columns, using one
//! column per [`MAX_ROWS`] entries.

use std::io::Write;

use crate::keymap::{MenuEntry, MenuSnapshot};

pub const MAX_COLUMNS: usize = 10;
pub const MAX_ROWS: usize = 5;

/// Grid dimensions `(columns, rows)` for `count` entries
pub fn grid_size(count: usize) -> (usize, usize) {
    let columns = (count / MAX_ROWS).clamp(1, MAX_COLUMNS);
    let rows = count.div_ceil(columns).max(1);
    (columns, rows)
}

/// `key -> description`, with a `+` marking submenus
fn format_entry(entry: &MenuEntry) -> String {
    let marker = if entry.submenu { "+" } else { "" };
    format!("{:>5} -> {}{}", entry.key.to_string(), marker, entry.description)
}

/// Render a snapshot into lines of text
pub fn render_lines(snapshot: &MenuSnapshot) -> Vec<String> {
    let cells: Vec<String> = snapshot.entries.iter().map(format_entry).collect();
    let (_, rows) = grid_size(cells.len());
    let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);

    let mut lines = vec![format!("[{}] {}", snapshot.key, snapshot.description)];
    for row in 0..rows {
        let line = cells
            .iter()
            .skip(row)
            .step_by(rows)
            .map(|cell| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        if !line.is_empty() {
            lines.push(line.trim_end().to_string());
        }
    }
    lines
}

/// Writes the current menu to a terminal or any other writer
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    visible: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show hook target
    pub fn show(&mut self, display: bool) {
        self.visible = display;
        if !display {
            self.write_lines(&["-- closed --".to_string()]);
        }
    }

    /// Update hook target; ignored while hidden
    pub fn update(&mut self, snapshot: &MenuSnapshot) {
        if !self.visible {
            return;
        }
        self.write_lines(&render_lines(snapshot));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{}", line))
            .and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Failed to render menu: {}", e);
        }
    }
}
