//! Copying resolved prompts to the clipboard
//!
//! The system clipboard is tried first. When it is unavailable (headless
//! session, no display server) the text is sent to the terminal as an OSC 52
//! escape sequence, which most terminal emulators forward to the clipboard.
//! On X11 and Wayland the system clipboard only holds text while the owning
//! process lives, so there the escape sequence is sent as well. Either way the
//! learner sees the same confirmation.

use std::io::Write;

use base64::Engine;
use tracing::{debug, warn};

use crate::error::{CompanionError, Result};

/// Confirmation shown after every copy attempt
pub const COPIED_MESSAGE: &str = "Copied! Paste into your favorite LLM.";

/// Something that can receive copied text
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;

    /// Whether copied text stays available after this process exits
    fn outlives_process(&self) -> bool {
        true
    }
}

/// Native clipboard via arboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| CompanionError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| CompanionError::Clipboard(e.to_string()))?;
        debug!(chars = text.len(), "Copied to system clipboard");
        Ok(())
    }

    fn outlives_process(&self) -> bool {
        !cfg!(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))
    }
}

/// Terminal clipboard via the OSC 52 escape sequence
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{}\x07", encoded)?;
        self.out.flush()?;
        debug!(chars = text.len(), "Copied via OSC 52");
        Ok(())
    }
}

/// Primary clipboard with a fallback
pub struct ClipboardChain {
    primary: Option<Box<dyn Clipboard>>,
    fallback: Box<dyn Clipboard>,
}

impl ClipboardChain {
    pub fn new(primary: Option<Box<dyn Clipboard>>, fallback: Box<dyn Clipboard>) -> Self {
        Self { primary, fallback }
    }

    /// Copy `text`, never failing. Returns the confirmation to show.
    ///
    /// The fallback runs when the primary fails or cannot keep the text
    /// once the process is gone.
    pub fn copy_prompt(&mut self, text: &str) -> &'static str {
        if let Some(primary) = self.primary.as_mut() {
            match primary.copy(text) {
                Ok(()) if primary.outlives_process() => return COPIED_MESSAGE,
                Ok(()) => debug!("Primary clipboard is tied to this process, also using fallback"),
                Err(e) => warn!(error = %e, "Primary clipboard failed, using fallback"),
            }
        }
        if let Err(e) = self.fallback.copy(text) {
            warn!(error = %e, "Fallback clipboard failed");
        }
        COPIED_MESSAGE
    }
}
