//! Bounded subprocess execution for provider commands.

use anyhow::Context;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::HooksError;

/// Run `program args..` with stdin closed and return its trimmed stdout.
///
/// The child is killed if `timeout` elapses. A non-zero exit is an error.
pub async fn run_command(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> anyhow::Result<String> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, child)
        .await
        .with_context(|| format!("{} timed out after {}s", program, timeout.as_secs()))?
        .with_context(|| format!("failed to spawn {}", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(HooksError::Provider(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        ))
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run_command_captures_stdout() {
        let out = run_command("echo", &args(&["  hello  "]), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn test_run_command_nonzero_exit_is_error() {
        let err = run_command("false", &[], Duration::from_secs(5)).await.unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }

    #[tokio::test]
    async fn test_run_command_missing_program_is_error() {
        let err = run_command("claude-hooks-no-such-binary", &[], Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to spawn"));
    }

    #[tokio::test]
    async fn test_run_command_times_out() {
        let err = run_command("sleep", &args(&["5"]), Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
