#![forbid(unsafe_code)]
//! Text file normalizer.
//!
//! Rewrites text files to a single convention: LF line endings, no leading
//! UTF-8 byte-order mark, no trailing whitespace on any line. Optionally
//! re-encodes the text from one charset to another.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use textnorm::{FileTask, NormalizeOptions, process_file};
//!
//! let options = NormalizeOptions::new().with_inform_only(true);
//! let report = process_file(&FileTask::new("index.php"), &options)?;
//! println!("{}", report);
//! # Ok::<(), textnorm::Error>(())
//! ```
//!
//! # Pipeline
//!
//! - **Decode**: lossy UTF-8 by default, strict on request
//! - **BOM**: a leading U+FEFF is removed
//! - **Line endings**: CRLF and lone CR become LF
//! - **Whitespace**: trailing whitespace and trailing blank lines are dropped
//! - **Charset**: optional, guarded against converting UTF-8 twice
//!
//! See [`normalizer`] for how a "change" is decided.

pub mod charset;
pub mod error;
pub mod normalizer;
pub mod options;
pub mod report;
pub mod task;

pub use crate::{
    error::Error,
    normalizer::{ConversionOutcome, Normalized, normalize},
    options::{DEFAULT_TARGET_CHARSET, DecodeMode, NormalizeOptions},
    report::Report,
    task::{FileTask, process_file},
};
