//! Shell command probes.
//!
//! Manifests can describe sibling-component presence and version checks as
//! shell commands. Commands run through `sh -c` with output captured, never
//! inherited.

use std::process::{Command, Stdio};

/// Run a command and report whether it exited with status 0.
pub fn succeeds(cmd: &str) -> bool {
    let status = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::debug!("Failed to spawn probe command '{}': {}", cmd, e);
            false
        }
    }
}

/// Run a command and return its trimmed stdout when it succeeds.
///
/// Empty output counts as no answer.
pub fn output(cmd: &str) -> Option<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Whether `name` is a command, builtin, or function known to the shell.
///
/// The name is passed as a positional argument, never interpolated.
pub fn shell_knows(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    Command::new("sh")
        .arg("-c")
        .arg("command -v \"$1\"")
        .arg("sh")
        .arg(name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}
