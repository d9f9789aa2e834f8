use std::io::Write;

use super::config::ReportConfig;
use super::machine::{ReportMachine, ScanIssue};
use crate::error::ScanError;
use crate::tokenizer::XmlTokenizer;

/// Counters and anomalies from one completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Tokens handed to the state machine.
    pub tokens: usize,
    /// `Amount:` lines written.
    pub amounts_reported: usize,
    /// `id` lines written, in either output mode.
    pub ids_reported: usize,
    /// Elements still open when the input ended.
    pub final_depth: usize,
    /// Content-level anomalies, in document order.
    pub issues: Vec<ScanIssue>,
}

impl ScanSummary {
    /// Total number of report lines written.
    #[must_use]
    pub const fn lines_written(&self) -> usize {
        self.amounts_reported + self.ids_reported
    }
}

/// Scan `xml` once, writing report lines to `sink`.
///
/// Tokens are pulled one at a time and handed straight to a fresh
/// [`ReportMachine`]; nothing is buffered. The sink is flushed when the scan
/// completes.
///
/// # Errors
///
/// Returns [`ScanError::MalformedInput`] if a tag or comment is left open, and
/// [`ScanError::Io`] if the sink fails. Lines written before the failure stay
/// in the sink.
pub fn scan<W: Write>(
    xml: &str,
    config: &ReportConfig,
    sink: &mut W,
) -> Result<ScanSummary, ScanError> {
    let mut tokenizer = XmlTokenizer::new(xml);
    let mut machine = ReportMachine::new(*config);

    while let Some(token) = tokenizer.next_token()? {
        machine.process(token, tokenizer.token_start(), sink)?;
    }
    sink.flush()?;

    Ok(ScanSummary {
        tokens: machine.tokens_processed(),
        amounts_reported: machine.amounts_reported(),
        ids_reported: machine.ids_reported(),
        final_depth: machine.depth(),
        issues: machine.into_issues(),
    })
}

/// The output of a successful [`ForwardOnlyParser::parse`].
#[derive(Debug)]
pub struct ScanReport<W> {
    /// The sink, handed back to the caller after being flushed.
    pub output: W,
    /// What the run did.
    pub summary: ScanSummary,
}

/// A parser that must have an output bound before it can run.
///
/// Each call to [`Self::parse`] consumes the bound output: the sink is flushed
/// and returned in the [`ScanReport`], and another output must be bound before
/// the next run.
#[derive(Debug)]
pub struct ForwardOnlyParser<W> {
    output: Option<W>,
}

impl<W> Default for ForwardOnlyParser<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> ForwardOnlyParser<W> {
    /// Create a parser with no output bound.
    #[must_use]
    pub const fn new() -> Self {
        Self { output: None }
    }

    /// Bind the destination for the next run, dropping any previous one.
    pub fn bind_output(&mut self, output: W) {
        self.output = Some(output);
    }

    /// Whether an output is currently bound.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.output.is_some()
    }
}

impl<W: Write> ForwardOnlyParser<W> {
    /// Run one scan over `xml` into the bound output.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotConfigured`] if no output is bound, otherwise
    /// any error from [`scan`]. On error the output is dropped.
    pub fn parse(&mut self, xml: &str, config: &ReportConfig) -> Result<ScanReport<W>, ScanError> {
        let mut output = self.output.take().ok_or(ScanError::NotConfigured)?;
        let summary = scan(xml, config, &mut output)?;
        Ok(ScanReport { output, summary })
    }
}
