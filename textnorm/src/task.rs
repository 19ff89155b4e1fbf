//! Reading, normalizing and conditionally rewriting one file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{error::Error, normalizer::normalize, options::NormalizeOptions, report::Report};

/// A file to normalize and where to write the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub source: PathBuf,
    /// Alternate output path; `None` rewrites `source` in place.
    pub output: Option<PathBuf>,
}

impl FileTask {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// The path a changed file is written to.
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.source)
    }
}

/// Normalizes the file behind `task`.
///
/// The file is read fully and written back (to the output path, or in place)
/// only when the result counts as changed and `options.inform_only` is off.
/// The text is always written as UTF-8.
///
/// # Errors
///
/// I/O failures and, in strict decode mode, [`Error::Malformed`]. Charset
/// conversion problems do not fail the call; they are in
/// [`Report::conversion`].
pub fn process_file(task: &FileTask, options: &NormalizeOptions) -> Result<Report, Error> {
    let bytes = fs::read(&task.source)?;
    let normalized = normalize(&bytes, options)?;

    let written = normalized.changed && !options.inform_only;
    if written {
        fs::write(task.output_path(), normalized.text.as_bytes())?;
    }

    Ok(Report {
        path: task.source.clone(),
        original_size: normalized.original_size,
        result_size: normalized.result_size,
        changed: normalized.changed,
        written,
        conversion: normalized.conversion,
    })
}
