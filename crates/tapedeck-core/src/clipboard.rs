//! System clipboard access for the copy buttons.

use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::ConsoleError;

/// Running inside a Flatpak sandbox
fn is_flatpak() -> bool {
    std::path::Path::new("/.flatpak-info").exists()
}

/// GNOME does not implement wlr-data-control, so inside Flatpak the bundled
/// `wl-copy` is used instead of arboard.
fn copy_via_wl_copy(text: &str) -> Result<(), ConsoleError> {
    let mut child = Command::new("wl-copy")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| ConsoleError::Clipboard(format!("Failed to spawn wl-copy: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ConsoleError::Clipboard(format!("Failed to write to wl-copy: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| ConsoleError::Clipboard(format!("Failed to wait for wl-copy: {e}")))?;
    if !status.success() {
        return Err(ConsoleError::Clipboard(
            "wl-copy exited with non-zero status".to_string(),
        ));
    }

    Ok(())
}

/// Write text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<(), ConsoleError> {
    if is_flatpak() {
        return copy_via_wl_copy(text);
    }

    let mut clipboard = Clipboard::new()
        .map_err(|e| ConsoleError::Clipboard(format!("Failed to access clipboard: {e}")))?;
    clipboard
        .set_text(text)
        .map_err(|e| ConsoleError::Clipboard(format!("Failed to copy text: {e}")))?;

    crate::verbose!("Copied {} chars to clipboard", text.len());
    Ok(())
}
