//! Copying an entity id, with its own pending/success/error notices.

use crate::descriptor::EntityKind;
use crate::notify::{NotificationSequencer, Outcome};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Writes `id` to the clipboard, bracketed by "Copying..." and a terminal notice.
pub fn copy_id(
    notifier: &NotificationSequencer,
    clipboard: &dyn Clipboard,
    kind: EntityKind,
    id: &str,
) -> Result<(), ClipboardError> {
    let pending = notifier.pending("Copying...");
    match clipboard.write_text(id) {
        Ok(()) => {
            pending.finish(Outcome::Success(format!(
                "{} ID copied to the clipboard",
                kind.descriptor().label
            )));
            Ok(())
        }
        Err(e) => {
            pending.finish(Outcome::Error("Error to copy into clipboard".into()));
            Err(e)
        }
    }
}

/// In-process clipboard. `unavailable()` builds one that always fails.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
    broken: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("permission denied".into()));
        }
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}
