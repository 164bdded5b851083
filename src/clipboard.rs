use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::error::ClipboardError;

/// Which tier completed a copy.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CopyTier {
    System,
    Fallback,
}

pub trait ClipboardSink {
    fn label(&self) -> &'static str;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Host clipboard through arboard.
///
/// The handle is created on first use and then kept, since on X11 and
/// Wayland the copied text is only served while it is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn label(&self) -> &'static str {
        "system"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(cb) => cb,
            None => arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable {
                backend: "system",
                reason: e.to_string(),
            })?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::WriteFailed {
                backend: "system",
                reason: e.to_string(),
            })
    }
}

const UTILITIES: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip.exe", &[]),
];

/// Pipes text into the first clipboard utility found on PATH.
pub struct CommandClipboard {
    utilities: Vec<(String, Vec<String>)>,
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self::with_utilities(UTILITIES)
    }
}

impl CommandClipboard {
    pub fn with_utilities(utilities: &[(&str, &[&str])]) -> Self {
        Self {
            utilities: utilities
                .iter()
                .map(|(prog, args)| {
                    (prog.to_string(), args.iter().map(|a| a.to_string()).collect())
                })
                .collect(),
        }
    }

    fn pipe_to(prog: &str, args: &[String], text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(prog)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // Closing stdin before waiting lets the utility see EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::WriteFailed {
                backend: "utility",
                reason: format!("{} exited with {}", prog, status),
            })
        }
    }
}

impl ClipboardSink for CommandClipboard {
    fn label(&self) -> &'static str {
        "utility"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut last_err = ClipboardError::NoUtility;
        for (prog, args) in &self.utilities {
            match Self::pipe_to(prog, args, text) {
                Ok(()) => {
                    log::debug!("copied via {}", prog);
                    return Ok(());
                }
                Err(ClipboardError::Io(e)) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    log::warn!("{} failed: {}", prog, e);
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }
}

/// Stands in for the fallback tier when it has been turned off.
pub struct DisabledClipboard;

impl ClipboardSink for DisabledClipboard {
    fn label(&self) -> &'static str {
        "disabled"
    }

    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::FallbackDisabled)
    }
}

/// Two-tier write: the system clipboard first, then the fallback sink.
pub fn copy_with_fallback(
    primary: &mut dyn ClipboardSink,
    fallback: &mut dyn ClipboardSink,
    text: &str,
) -> Result<CopyTier, ClipboardError> {
    let primary_err = match primary.write_text(text) {
        Ok(()) => return Ok(CopyTier::System),
        Err(e) => e,
    };
    log::info!("{} clipboard failed ({}), trying {}", primary.label(), primary_err, fallback.label());
    match fallback.write_text(text) {
        Ok(()) => Ok(CopyTier::Fallback),
        Err(fallback_err) => Err(ClipboardError::Exhausted {
            primary: Box::new(primary_err),
            fallback: Box::new(fallback_err),
        }),
    }
}
