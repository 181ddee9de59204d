//! Focused window inspection backed by an external command
//!
//! The command (for example `xdotool getactivewindow getwindowname` on X11)
//! is run through the shell and its trimmed stdout is taken as the title.

use std::process::Stdio;

use crate::executor::shell_command;
use crate::keymap::FocusInspector;

#[derive(Debug, Clone)]
pub struct CommandInspector {
    command: String,
}

impl CommandInspector {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

impl FocusInspector for CommandInspector {
    fn focused_title(&self) -> Option<String> {
        let output = shell_command(&self.command)
            .stdin(Stdio::null())
            .output();

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Focus command '{}' failed to start: {}", self.command, e);
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!("Focus command '{}' exited with {}", self.command, output.status);
            return None;
        }

        let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!title.is_empty()).then_some(title)
    }
}
