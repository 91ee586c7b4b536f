//! External collaborators the core depends on but does not implement:
//! syntax highlighting, code formatting, image rendering and the clipboard.
//!
//! Formatting, rendering and clipboard access all follow the same subprocess
//! discipline: pipe the text over stdin, wait synchronously, and turn a
//! missing executable or non-zero exit into a `Collaborator` error.

pub mod clipboard;
pub mod export;
pub mod format;
pub mod highlight;

use std::io::Write;
use std::process::{Command, Output, Stdio};

use crate::error::{Error, Result};

/// Run `command` with `input` piped to stdin and wait for it to finish.
/// The returned output has already been checked for a successful exit.
pub(crate) fn run_with_stdin(mut command: Command, input: &str) -> Result<Output> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            let reason = if err.kind() == std::io::ErrorKind::NotFound {
                format!("'{program}' is not installed or not on your PATH")
            } else {
                err.to_string()
            };
            Error::collaborator(program.clone(), reason)
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .map_err(|err| Error::collaborator(program.clone(), err.to_string()))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|err| Error::collaborator(program.clone(), err.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = match stderr.trim() {
            "" => format!("exited with {}", output.status),
            detail => detail.to_string(),
        };
        return Err(Error::collaborator(program, reason));
    }
    Ok(output)
}
