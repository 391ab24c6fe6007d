//! System clipboard backed by `arboard`.
//!
//! The clipboard handle is opened on first use and kept for the rest of the
//! session. Failures are logged and otherwise ignored: a copy is
//! fire-and-forget.

use log::{info, warn};

use crate::core::services::Clipboard;

#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.inner = Some(clipboard),
                Err(e) => warn!("Clipboard unavailable: {}", e),
            }
        }
        self.inner.as_mut()
    }
}

impl Clipboard for SystemClipboard {
    fn save(&mut self, label: &str, text: &str) {
        let Some(clipboard) = self.handle() else {
            return;
        };
        // arboard has no notion of a label; it only goes to the log
        match clipboard.set_text(text.to_owned()) {
            Ok(()) => info!("Copied {} bytes of {} source", text.len(), label),
            Err(e) => warn!("Failed to copy {} source: {}", label, e),
        }
    }
}
