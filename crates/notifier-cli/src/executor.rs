//! Runs produced actions through the shell.

use anyhow::{Context, Result};
use notifier_core::Action;
use tokio::process::Command;
use tracing::debug;

/// Run each command with `sh -c`, in order, stopping at the first failure.
pub async fn run(action: Action) -> Result<()> {
    for (index, command) in action.into_iter().enumerate() {
        debug!("Running action step {}", index + 1);

        let status = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .status()
            .await
            .with_context(|| format!("Failed to spawn shell for step {}", index + 1))?;

        if !status.success() {
            anyhow::bail!(
                "Step {} exited with {}: {}",
                index + 1,
                status
                    .code()
                    .map(|c| format!("code {c}"))
                    .unwrap_or_else(|| "a signal".to_string()),
                first_line(&command)
            );
        }
    }
    Ok(())
}

/// Write each command on its own line for a wrapping shell to evaluate.
pub fn print(action: &Action) {
    for command in action.commands() {
        println!("{}", command);
    }
}

fn first_line(command: &str) -> &str {
    command.lines().next().unwrap_or_default()
}
