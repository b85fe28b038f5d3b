use crate::error::{Result, YttextError};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Clipboard utilities tried in order, with their arguments.
#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Copy `text` to the system clipboard via the first utility that works.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for (program, args) in CANDIDATES {
        match pipe_into(program, args, text) {
            Ok(()) => {
                debug!("Copied {} bytes with {}", text.len(), program);
                return Ok(());
            }
            Err(e) => debug!("{} unavailable: {}", program, e),
        }
    }

    let tried: Vec<&str> = CANDIDATES.iter().map(|(p, _)| *p).collect();
    Err(YttextError::Io(std::io::Error::other(format!(
        "no clipboard utility found (tried {})",
        tried.join(", ")
    ))))
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };

    // Reap the child even when the write failed (e.g. it exited early).
    if let Err(e) = written {
        let _ = child.kill();
        let _ = child.wait();
        return Err(e);
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(std::io::Error::other(format!(
            "{} exited with {}",
            program, status
        )));
    }
    Ok(())
}
