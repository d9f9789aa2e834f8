//! Report generation.
//!
//! The [`ReportMachine`] consumes tokens and writes report lines; [`scan`]
//! drives one complete run; [`ForwardOnlyParser`] adds output binding on top.

/// Run-scoped configuration.
pub mod config;
/// The report state machine.
pub mod machine;
/// Run driver and the output-binding parser facade.
pub mod parser;

pub use config::ReportConfig;
pub use machine::{AMOUNT_ELEMENT, ID_ATTRIBUTE, ParserMode, ReportLine, ReportMachine, ScanIssue};
pub use parser::{ForwardOnlyParser, ScanReport, ScanSummary, scan};
