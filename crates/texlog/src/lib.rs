//! # texlog
//!
//! Scanner for LaTeX engine log files (`*.log`) with structured diagnostic output.
//!
//! ## Overview
//!
//! This crate turns the unstructured, line-wrapped output of TeX engines
//! (pdfTeX, XeTeX, LuaTeX, etc.) into [`Diagnostic`](ir::Diagnostic) records
//! bucketed as errors, warnings and typesetting (bad box) notices. Each record
//! carries the source line number when the log gives one and the input file
//! that was open when it was printed.
//!
//! The scanner handles:
//!
//! - **Line wrapping**: TeX logs wrap at 79 characters, splitting paths and messages
//! - **File stack tracking**: Matching `(file.tex` and `)` pairs for context
//! - **Error/warning extraction**: `!` errors, `LaTeX Warning:`, package warnings,
//!   overfull/underfull boxes, runaway arguments and fatal aborts
//! - **Multi-line messages**: continuation lines are joined with a single space
//! - **Deduplication**: optional collapsing of repeated `(file, line, message)`
//!
//! ## Architecture
//!
//! ```text
//!  raw log ──► LogText ──► cursor loop ──┬─► classify ──► Diagnostic ─┐
//!             (unwrap)                   │                             │
//!                                        └─► FileStack ─── file ───────┤
//!                                                                      ▼
//!                                       dedup (optional) ──► ParseResult::assemble
//! ```
//!
//! Parsing never fails: unrecognized lines are skipped, missing line numbers
//! are left absent and unbalanced parentheses are clamped.
//!
//! ## Examples
//!
//! ```
//! use texlog::{LogParser, ParseOptions};
//!
//! let log = "(./main.tex\n\
//!            LaTeX Warning: Reference `fig:a' on page 1 undefined on input line 12.\n\
//!            \n\
//!            )";
//! let result = LogParser::with_options(ParseOptions::default()).parse(log);
//!
//! assert_eq!(result.warnings.len(), 1);
//! assert_eq!(result.warnings[0].line, Some(12));
//! assert_eq!(result.warnings[0].file.as_deref(), Some("./main.tex"));
//! ```
//!
//! ### Exporting to JSON
//!
//! The result types implement `serde::Serialize`:
//!
//! ```no_run
//! use std::fs;
//!
//! let log = fs::read_to_string("main.log")?;
//! let result = texlog::parse(&log, &texlog::ParseOptions::default());
//! fs::write("diagnostics.json", serde_json::to_string_pretty(&result)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Line classification: the ordered table of diagnostic matchers.
pub mod classify;
/// Duplicate collapsing.
pub mod dedup;
pub mod error;
/// Diagnostic records and the assembled result.
pub mod ir;
pub mod options;
/// The scanning loop.
pub mod parser;
/// File-inclusion tracking.
pub mod stack;
/// Line splitting and hard-wrap undoing.
pub mod text;


pub use error::OptionsError;
pub use ir::{Diagnostic, IncludedFile, Level, ParseResult};
pub use options::{ParseOptions, set_default_ignore_duplicates};
pub use parser::{LogParser, parse};

/// Schema version for the serialized [`ParseResult`].
///
/// - MAJOR: Breaking changes to record structure
/// - MINOR: New optional fields
/// - PATCH: Bug fixes to scanning behavior
pub const SCHEMA_VERSION: &str = "1.0.0";
