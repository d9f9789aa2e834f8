//! Common utilities for the sift scanner.
//!
//! This crate provides shared infrastructure used by the scanner library and
//! the command-line front end:
//! - **Warning System** - deduplicated, colored diagnostics on stderr

pub mod warning;
