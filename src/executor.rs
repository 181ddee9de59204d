//! Executors for selected commands
//!
//! - `ShellExecutor` - spawns the payload through the platform shell and reaps
//!   it in the background
//! - `DryRunExecutor` - prints the payload instead of running it

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use std::thread;

use crate::keymap::Executor;

/// Runs payloads with `sh -c` (`cmd /C` on Windows) without waiting for them
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

/// Build a platform shell invocation of `script`
pub(crate) fn shell_command(script: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", script]);
        command
    }

    #[cfg(not(target_os = "windows"))]
    {
        let mut command = Command::new("sh");
        command.args(["-c", script]);
        command
    }
}

impl Executor for ShellExecutor {
    fn execute(&self, description: &str, payload: &str) {
        let spawned = shell_command(payload)
            .stdin(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                tracing::info!("Started '{}' (pid {}): {}", description, child.id(), payload);
                reap(child);
            }
            Err(e) => {
                tracing::warn!("Failed to start '{}' ({}): {}", description, payload, e);
            }
        }
    }
}

/// Wait for `child` on a background thread so it never lingers as a zombie
fn reap(mut child: Child) {
    let pid = child.id();
    let reaper = thread::Builder::new()
        .name(format!("whichkey-reap-{}", pid))
        .spawn(move || match child.wait() {
            Ok(status) => tracing::debug!("Command (pid {}) exited with {}", pid, status),
            Err(e) => tracing::warn!("Failed to wait for command (pid {}): {}", pid, e),
        });
    if let Err(e) = reaper {
        tracing::warn!("Failed to start reaper for pid {}: {}", pid, e);
    }
}

/// Writes `Execute command: <payload>` lines instead of running anything
#[derive(Debug)]
pub struct DryRunExecutor<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> DryRunExecutor<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DryRunExecutor<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Executor for DryRunExecutor<W> {
    fn execute(&self, description: &str, payload: &str) {
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "Execute command: {}", payload) {
            tracing::warn!("Failed to report dry-run command '{}': {}", description, e);
        }
    }
}
