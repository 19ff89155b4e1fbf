//! Per-file result of a normalization run.

use std::fmt;
use std::path::PathBuf;

use crate::normalizer::ConversionOutcome;

/// What [`crate::process_file`] did to one file.
///
/// `written` implies `changed`. A changed file that was not written was
/// processed in inform-only mode.
#[derive(Debug)]
pub struct Report {
    pub path: PathBuf,
    pub original_size: usize,
    pub result_size: usize,
    pub changed: bool,
    pub written: bool,
    pub conversion: ConversionOutcome,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changed {
            return write!(f, "Nothing changed. Same size: {}.", self.result_size);
        }

        write!(
            f,
            "{}: Original size: {}, Result size: {}.",
            self.path.display(),
            self.original_size,
            self.result_size
        )?;
        if !self.written {
            f.write_str(" (unchanged)")?;
        }
        Ok(())
    }
}
