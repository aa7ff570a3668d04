use crate::errors::ClipboardError;

/// Destination for "copy to clipboard". Writes are best-effort.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
