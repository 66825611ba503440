use std::fmt;

use arboard::Clipboard;

use crate::domain::Record;

#[derive(Debug)]
pub enum ClipboardError {
    Serialize(serde_json::Error),
    Clipboard(arboard::Error),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Serialize(err) => write!(f, "Serialization failed: {}", err),
            ClipboardError::Clipboard(err) => write!(f, "Clipboard unavailable: {}", err),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Pretty JSON object of the record's columns, in file order.
pub fn record_to_json(record: &Record) -> Result<String, ClipboardError> {
    serde_json::to_string_pretty(record).map_err(ClipboardError::Serialize)
}

pub fn copy_record(record: &Record) -> Result<(), ClipboardError> {
    let json = record_to_json(record)?;
    let mut clipboard = Clipboard::new().map_err(ClipboardError::Clipboard)?;
    clipboard.set_text(json).map_err(ClipboardError::Clipboard)
}
