//! Cursor helpers for the tokenizer.
//!
//! Every lookup goes through `str::get` or a slice search, never a raw index
//! past the cursor, so the scanner cannot run off the end of the buffer.

use super::scanner::XmlTokenizer;
use crate::error::{Construct, ScanError};

impl XmlTokenizer<'_> {
    /// The byte under the cursor, or `None` at end of input.
    pub(super) fn current_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.current_pos).copied()
    }

    /// Check if the next few characters match `target` exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input
            .get(self.current_pos..)
            .is_some_and(|rest| rest.starts_with(target))
    }

    /// Byte offset of the first `needle` at or after `from`.
    pub(super) fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.input
            .get(from..)
            .and_then(|rest| rest.find(needle))
            .map(|offset| from + offset)
    }

    /// Move the cursor past the first `close` found at or after `from`.
    pub(super) fn skip_past(
        &mut self,
        from: usize,
        close: &str,
        construct: Construct,
    ) -> Result<(), ScanError> {
        let start = self.current_pos;
        match self.find_from(from, close) {
            Some(end) => {
                self.current_pos = end + close.len();
                Ok(())
            }
            None => Err(self.fail(construct, start)),
        }
    }

    /// Mark the tokenizer as exhausted and build the error for `construct`.
    pub(super) fn fail(&mut self, construct: Construct, position: usize) -> ScanError {
        self.failed = true;
        self.current_pos = self.input.len();
        ScanError::MalformedInput {
            construct,
            position,
        }
    }
}
