//! Executor boundary for selected commands
//!
//! The resolver only decides *when* a command is selected. What running it
//! means is up to the [`Executor`] implementation, which must return without
//! waiting for the command to finish.

use super::node::Command;

/// Runs the payload of a selected command
pub trait Executor {
    /// Fire-and-forget; failures are the executor's to report
    fn execute(&self, description: &str, payload: &str);
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&self, description: &str, payload: &str) {
        (**self).execute(description, payload)
    }
}

/// Hand a selected command to the executor
pub fn execute(executor: &dyn Executor, command: &Command) {
    tracing::debug!(
        "Executing '{}' ({}): {}",
        command.description,
        command.key,
        command.payload
    );
    executor.execute(&command.description, &command.payload);
}
