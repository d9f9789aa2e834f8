//! Forward-only XML scanner for order reports.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a single left-to-right scan that yields start tags, end
//!   tags and trimmed text runs, skipping comments and declarations
//!   - Attribute parsing for start tags
//!   - Decoding of the five predefined XML entities
//!
//! - **Report state machine** - consumes tokens one at a time and writes
//!   `Amount:` and `id` report lines to an output sink
//!   - Path stack with an optional absolute-path output mode
//!   - Amount threshold filtering that gates later `id` attributes
//!
//! # Not Supported
//!
//! - Validation, namespaces, DTDs and CDATA sections
//! - Recovery from unterminated tags or comments
//! - Reading directly from disk; the whole document must be in memory

/// Error types shared by the tokenizer and the report runner.
pub mod error;
/// Report state machine, configuration and the run driver.
pub mod report;
/// Tokenizer for converting a document into tokens.
pub mod tokenizer;

pub use error::{Construct, ScanError};
pub use report::{
    ForwardOnlyParser, ParserMode, ReportConfig, ReportLine, ReportMachine, ScanIssue,
    ScanReport, ScanSummary, scan,
};
pub use tokenizer::{AttributeMap, Token, XmlTokenizer, decode_entities, parse_attributes};
