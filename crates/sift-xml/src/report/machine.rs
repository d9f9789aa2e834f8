use std::fmt;
use std::io::Write;

use sift_common::warning::warn_once;
use strum_macros::Display;

use super::config::ReportConfig;
use crate::error::ScanError;
use crate::tokenizer::{Token, decode_entities, parse_attributes};

/// Element whose text holds the amount being filtered.
pub const AMOUNT_ELEMENT: &str = "amount";

/// Attribute reported while a valid amount is active.
pub const ID_ATTRIBUTE: &str = "id";

/// Coarse position of the machine relative to `amount` elements.
///
/// Transitions depend only on whether a tag is named `amount`:
///
/// | token            | new mode    |
/// |------------------|-------------|
/// | `<amount>`       | `InAmount`  |
/// | any other start  | `InElement` |
/// | `</amount>`      | `InElement` |
/// | any other end    | `Start`     |
///
/// A non-`amount` end tag always returns to `Start`, even when an enclosing
/// element is still open. Only `InAmount` is ever consulted, and only start
/// tags enter it, so this never changes the emitted report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum ParserMode {
    /// Not inside an element of interest.
    #[default]
    Start,
    /// Inside some element other than `amount`.
    InElement,
    /// Inside an `amount` element, waiting for its text.
    InAmount,
}

/// One line of report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine<'a> {
    /// `Amount: <value>` for an amount that passed the filter.
    Amount(&'a str),
    /// `Order ID: <id>` in flat mode.
    OrderId(&'a str),
    /// `<path>/@id = "<id>"` in path-tracking mode.
    PathId {
        /// Absolute path of the element carrying the attribute.
        path: &'a str,
        /// The attribute value.
        id: &'a str,
    },
}

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(value) => write!(f, "Amount: {value}"),
            Self::OrderId(id) => write!(f, "Order ID: {id}"),
            Self::PathId { path, id } => write!(f, "{path}/@id = \"{id}\""),
        }
    }
}

/// A content-level anomaly that did not stop the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanIssue {
    /// What was wrong.
    pub message: String,
    /// Byte offset in the document where the offending token starts.
    pub position: usize,
}

/// The report state machine.
///
/// Holds everything a run needs between tokens: the stack of open element
/// names, its cached `/a/b/c` rendering, the amount-validity flag and the
/// current [`ParserMode`]. A machine is built per run and borrows element names
/// from the document it is fed.
#[derive(Debug)]
pub struct ReportMachine<'a> {
    config: ReportConfig,

    /// Open element names, innermost last. Its length is the nesting depth.
    path_stack: Vec<&'a str>,

    /// `path_stack` rendered as `/a/b/c`; empty when the stack is empty.
    current_path: String,

    /// Set when an `amount` value passes the filter, cleared on the next
    /// `<amount>`. Survives `</amount>` so later siblings can report their ids.
    amount_valid: bool,

    mode: ParserMode,

    tokens_processed: usize,
    amounts_reported: usize,
    ids_reported: usize,

    /// Content-level anomalies encountered so far.
    issues: Vec<ScanIssue>,
}

impl<'a> ReportMachine<'a> {
    /// Create a machine in its initial state.
    #[must_use]
    pub const fn new(config: ReportConfig) -> Self {
        Self {
            config,
            path_stack: Vec::new(),
            current_path: String::new(),
            amount_valid: false,
            mode: ParserMode::Start,
            tokens_processed: 0,
            amounts_reported: 0,
            ids_reported: 0,
            issues: Vec::new(),
        }
    }

    /// Feed one token, writing any resulting report line to `sink`.
    ///
    /// `position` is the byte offset of the token in the document and is only
    /// used to locate recorded issues.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Io`] if writing to `sink` fails.
    pub fn process<W: Write>(
        &mut self,
        token: Token<'a>,
        position: usize,
        sink: &mut W,
    ) -> Result<(), ScanError> {
        self.tokens_processed += 1;
        match token {
            Token::StartTag {
                name,
                raw_attributes,
                self_closing,
            } => {
                self.handle_start_tag(name, raw_attributes, sink)?;
                if self_closing {
                    self.handle_end_tag(name);
                }
            }
            Token::EndTag { name } => self.handle_end_tag(name),
            Token::Text { content } => self.handle_text(content, position, sink)?,
        }
        Ok(())
    }

    fn handle_start_tag<W: Write>(
        &mut self,
        name: &'a str,
        raw_attributes: &'a str,
        sink: &mut W,
    ) -> Result<(), ScanError> {
        self.push_element(name);

        // The id check runs before `<amount>` resets validity.
        let attributes = parse_attributes(raw_attributes);
        if let Some(&id) = attributes.get(ID_ATTRIBUTE)
            && self.amount_valid
        {
            let line = if self.config.track_paths {
                ReportLine::PathId {
                    path: &self.current_path,
                    id,
                }
            } else {
                ReportLine::OrderId(id)
            };
            emit(sink, line)?;
            self.ids_reported += 1;
        }

        if name == AMOUNT_ELEMENT {
            self.mode = ParserMode::InAmount;
            self.amount_valid = false;
        } else {
            self.mode = ParserMode::InElement;
        }
        Ok(())
    }

    fn handle_end_tag(&mut self, name: &str) {
        self.pop_element();
        self.mode = if name == AMOUNT_ELEMENT {
            ParserMode::InElement
        } else {
            ParserMode::Start
        };
    }

    fn handle_text<W: Write>(
        &mut self,
        content: &str,
        position: usize,
        sink: &mut W,
    ) -> Result<(), ScanError> {
        let text = decode_entities(content);
        if self.mode != ParserMode::InAmount {
            return Ok(());
        }

        match text.parse::<i32>() {
            Ok(amount) => {
                self.amount_valid = self.config.passes(amount);
                if self.amount_valid {
                    emit(sink, ReportLine::Amount(&text))?;
                    self.amounts_reported += 1;
                }
            }
            Err(err) => {
                self.record_issue(position, format!("non-numeric amount {text:?}: {err}"));
            }
        }
        Ok(())
    }

    fn push_element(&mut self, name: &'a str) {
        self.path_stack.push(name);
        self.current_path.push('/');
        self.current_path.push_str(name);
    }

    fn pop_element(&mut self) {
        if let Some(name) = self.path_stack.pop() {
            let len = self.current_path.len().saturating_sub(name.len() + 1);
            self.current_path.truncate(len);
        }
    }

    fn record_issue(&mut self, position: usize, message: String) {
        warn_once("Report", &message);
        self.issues.push(ScanIssue { message, position });
    }

    /// Current nesting depth (length of the path stack).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path_stack.len()
    }

    /// Open element names, outermost first.
    #[must_use]
    pub fn path_stack(&self) -> &[&'a str] {
        &self.path_stack
    }

    /// The path stack rendered as `/a/b/c`.
    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// The current mode.
    #[must_use]
    pub const fn mode(&self) -> ParserMode {
        self.mode
    }

    /// Whether the most recent amount passed the filter and is still active.
    #[must_use]
    pub const fn is_amount_valid(&self) -> bool {
        self.amount_valid
    }

    /// Issues recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[ScanIssue] {
        &self.issues
    }

    /// Number of tokens fed so far.
    #[must_use]
    pub const fn tokens_processed(&self) -> usize {
        self.tokens_processed
    }

    /// Number of `Amount:` lines written so far.
    #[must_use]
    pub const fn amounts_reported(&self) -> usize {
        self.amounts_reported
    }

    /// Number of `id` lines written so far.
    #[must_use]
    pub const fn ids_reported(&self) -> usize {
        self.ids_reported
    }

    /// Give up the recorded issues, ending the machine's life.
    #[must_use]
    pub fn into_issues(self) -> Vec<ScanIssue> {
        self.issues
    }
}

fn emit<W: Write>(sink: &mut W, line: ReportLine<'_>) -> Result<(), ScanError> {
    writeln!(sink, "{line}")?;
    Ok(())
}
