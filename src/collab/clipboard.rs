//! System clipboard access through the usual external tools.

use std::process::Command;

use crate::collab::run_with_stdin;
use crate::error::{Error, Result};

/// Copy `text` to the system clipboard via `xclip`, falling back to
/// `wl-copy` on Wayland sessions.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut xclip = Command::new("xclip");
    xclip.args(["-selection", "clipboard"]);
    if run_with_stdin(xclip, text).is_ok() {
        return Ok(());
    }

    let wl_copy = Command::new("wl-copy");
    run_with_stdin(wl_copy, text)
        .map(|_| ())
        .map_err(|_| Error::collaborator("clipboard", "xclip or wl-copy is required"))
}
