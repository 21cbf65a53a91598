//! Status display trait

use crate::error::DisplayError;

/// A small text panel showing one status message at a time.
pub trait StatusDisplay {
    /// Replace the screen contents with `lines`, drawn top-to-bottom.
    ///
    /// No scrolling or wrapping: lines that do not fit are dropped.
    fn render(&mut self, lines: &[&str]) -> Result<(), DisplayError>;
}
