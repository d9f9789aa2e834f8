use std::io;

use strum_macros::Display;
use thiserror::Error;

/// The kind of markup that was left open when the input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Construct {
    /// `<name ...` without a closing `>`.
    #[strum(to_string = "start tag")]
    StartTag,
    /// `</name` without a closing `>`.
    #[strum(to_string = "end tag")]
    EndTag,
    /// `<!--` without a closing `-->`.
    #[strum(to_string = "comment")]
    Comment,
    /// `<?` without a closing `?>`.
    #[strum(to_string = "processing instruction")]
    ProcessingInstruction,
    /// `<!` (not a comment) without a closing `>`.
    #[strum(to_string = "declaration")]
    Declaration,
}

impl Construct {
    /// The delimiter that terminates this construct.
    #[must_use]
    pub const fn closing_delimiter(self) -> &'static str {
        match self {
            Self::StartTag | Self::EndTag | Self::Declaration => ">",
            Self::Comment => "-->",
            Self::ProcessingInstruction => "?>",
        }
    }
}

/// Fatal conditions that end a run.
///
/// Content-level anomalies such as a non-numeric `amount` are not errors; they
/// are recorded as [`crate::ScanIssue`]s and the scan continues.
#[derive(Debug, Error)]
pub enum ScanError {
    /// `parse` was called before an output destination was bound.
    #[error("no output destination is bound; call `bind_output` before `parse`")]
    NotConfigured,

    /// Markup was opened but the input ended before its closing delimiter.
    #[error(
        "malformed input: {construct} starting at byte {position} has no closing `{}`",
        .construct.closing_delimiter()
    )]
    MalformedInput {
        /// What was left open.
        construct: Construct,
        /// Byte offset of the opening `<`.
        position: usize,
    },

    /// The output sink rejected a write or flush.
    #[error("failed to write report output")]
    Io(#[from] io::Error),
}

impl ScanError {
    /// Returns true for structural failures in the document itself.
    #[must_use]
    pub const fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}
