use std::fmt;

/// A single unit of the document as seen by the report state machine.
///
/// Every variant borrows from the document being scanned, so producing a token
/// never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name attr="value" ...>` or the self-closing form `<name ... />`.
    StartTag {
        /// First whitespace-delimited word after `<`.
        name: &'a str,
        /// Everything after the name, trimmed, with any trailing `/` removed.
        raw_attributes: &'a str,
        /// Set for `<name/>`; the element is opened and closed by this one tag.
        self_closing: bool,
    },

    /// `</name>`
    EndTag {
        /// Text after the slash, trimmed.
        name: &'a str,
    },

    /// Non-empty text between two tags, with surrounding whitespace removed.
    /// Entities are still encoded.
    Text {
        /// The trimmed text run.
        content: &'a str,
    },
}

impl<'a> Token<'a> {
    /// The element name for tag tokens, `None` for text.
    #[must_use]
    pub const fn tag_name(&self) -> Option<&'a str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name } => Some(*name),
            Self::Text { .. } => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                raw_attributes,
                self_closing,
            } => {
                write!(f, "<{name}")?;
                if !raw_attributes.is_empty() {
                    write!(f, " {raw_attributes}")?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Text { content } => write!(f, "Text({content:?})"),
        }
    }
}
