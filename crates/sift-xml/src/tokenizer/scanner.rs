use std::iter::FusedIterator;

use super::token::Token;
use crate::error::{Construct, ScanError};

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const PI_OPEN: &str = "<?";
const PI_CLOSE: &str = "?>";
const DECLARATION_OPEN: &str = "<!";
const TAG_CLOSE: &str = ">";

/// Forward-only tokenizer over a document that is already in memory.
///
/// The cursor only ever moves forward. Every search for a closing delimiter is
/// a bounds-checked slice search, so unterminated markup surfaces as
/// [`ScanError::MalformedInput`] instead of reading past the buffer. After the
/// first error the tokenizer is exhausted.
#[derive(Debug, Clone)]
pub struct XmlTokenizer<'a> {
    pub(super) input: &'a str,
    /// Byte offset of the next unread character.
    pub(super) current_pos: usize,
    /// Byte offset where the most recently returned token begins.
    pub(super) token_start: usize,
    pub(super) failed: bool,
}

impl<'a> XmlTokenizer<'a> {
    /// Create a tokenizer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            current_pos: 0,
            token_start: 0,
            failed: false,
        }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.current_pos
    }

    /// Byte offset at which the last token returned by [`Self::next_token`]
    /// starts. For text this is the first non-whitespace character.
    #[must_use]
    pub const fn token_start(&self) -> usize {
        self.token_start
    }

    /// Produce the next token, or `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::MalformedInput`] when a tag, comment or
    /// declaration is still open at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, ScanError> {
        if self.failed {
            return Ok(None);
        }
        while let Some(c) = self.current_byte() {
            let token = if c == b'<' {
                self.consume_markup()?
            } else {
                self.consume_text()
            };
            if token.is_some() {
                return Ok(token);
            }
        }
        Ok(None)
    }

    /// Tokenize the whole input eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] encountered.
    pub fn into_tokens(self) -> Result<Vec<Token<'a>>, ScanError> {
        self.collect()
    }

    /// Consume one `<...>` construct starting at the cursor.
    ///
    /// Returns `None` for markup that produces no token (comments,
    /// processing instructions, declarations).
    fn consume_markup(&mut self) -> Result<Option<Token<'a>>, ScanError> {
        let start = self.current_pos;

        if self.next_few_characters_are(COMMENT_OPEN) {
            self.skip_past(start + COMMENT_OPEN.len(), COMMENT_CLOSE, Construct::Comment)?;
            return Ok(None);
        }
        if self.next_few_characters_are(PI_OPEN) {
            self.skip_past(start + PI_OPEN.len(), PI_CLOSE, Construct::ProcessingInstruction)?;
            return Ok(None);
        }
        if self.next_few_characters_are(DECLARATION_OPEN) {
            self.skip_past(start + DECLARATION_OPEN.len(), TAG_CLOSE, Construct::Declaration)?;
            return Ok(None);
        }

        let content_start = start + 1;
        let is_end_tag = self.input[content_start..].starts_with('/');
        let construct = if is_end_tag {
            Construct::EndTag
        } else {
            Construct::StartTag
        };
        let close = self.find_from(content_start, TAG_CLOSE).ok_or_else(|| {
            self.fail(construct, start)
        })?;

        let content = &self.input[content_start..close];
        self.current_pos = close + TAG_CLOSE.len();
        self.token_start = start;

        let token = match content.strip_prefix('/') {
            Some(name) => Token::EndTag { name: name.trim() },
            None => start_tag(content),
        };
        Ok(Some(token))
    }

    /// Consume a text run up to the next `<` (or the end of input).
    ///
    /// Whitespace-only runs produce no token.
    fn consume_text(&mut self) -> Option<Token<'a>> {
        let start = self.current_pos;
        let end = self.find_from(start, "<").unwrap_or(self.input.len());
        self.current_pos = end;

        let run = &self.input[start..end];
        let content = run.trim();
        if content.is_empty() {
            return None;
        }
        self.token_start = start + (run.len() - run.trim_start().len());
        Some(Token::Text { content })
    }
}

/// Split the inside of a start tag into name and raw attribute text.
fn start_tag(content: &str) -> Token<'_> {
    let (content, self_closing) = match content.strip_suffix('/') {
        Some(inner) => (inner, true),
        None => (content, false),
    };
    let content = content.trim();
    let (name, raw_attributes) = match content.find(char::is_whitespace) {
        Some(split) => (&content[..split], content[split..].trim_start()),
        None => (content, ""),
    };
    Token::StartTag {
        name,
        raw_attributes,
        self_closing,
    }
}

impl<'a> Iterator for XmlTokenizer<'a> {
    type Item = Result<Token<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl FusedIterator for XmlTokenizer<'_> {}
