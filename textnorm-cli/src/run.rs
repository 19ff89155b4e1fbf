use std::path::Path;

use textnorm::{Error, FileTask, NormalizeOptions, process_file};

use crate::path_glob::MaskWalker;

/// Normalize one explicitly named file, whatever its extension.
pub fn run_single_file(
    source: &Path,
    target: Option<&Path>,
    options: &NormalizeOptions,
) -> Result<(), Error> {
    if !source.is_file() {
        return Err(Error::NotFound(source.to_path_buf()));
    }

    let task = FileTask::new(source).with_output(target.map(Path::to_path_buf));
    report_file(&task, options)
}

/// Normalize every allow-listed file the mask selects.
pub fn run_mask(mask: &str, options: &NormalizeOptions) -> Result<(), Error> {
    for path in MaskWalker::new(mask, options.recurse)? {
        report_file(&FileTask::new(path), options)?;
    }
    Ok(())
}

/// Process one task and print its report line. Only I/O errors escape.
fn report_file(task: &FileTask, options: &NormalizeOptions) -> Result<(), Error> {
    let report = match process_file(task, options) {
        Ok(report) => report,
        Err(e) if e.is_content_error() => {
            eprintln!("{}: skipped, {}", task.source.display(), e);
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if let Some(e) = report.conversion.error() {
        eprintln!("Conversion failed: {}", e);
    }
    println!("{}", report);
    Ok(())
}
