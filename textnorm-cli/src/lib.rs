//! CLI library for testing purposes

pub mod conversion;
pub mod path_glob;
pub mod run;

pub use conversion::{Conversion, parse_conversion};
pub use path_glob::{ALLOWED_EXTENSIONS, MaskWalker, expand, has_allowed_extension, is_mask};
pub use run::{run_mask, run_single_file};
