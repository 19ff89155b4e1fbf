use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use textnorm::{DecodeMode, Error, NormalizeOptions};
use textnorm_cli::{Conversion, is_mask, parse_conversion, run_mask, run_single_file};

const AFTER_HELP: &str = "\
Masks: quote them so the shell does not expand them, e.g. '*.php' or 'src/*'.
`*` also matches hidden files such as .htaccess. Only files with a known text
extension are processed through a mask; a file named explicitly always is.

WARNING: converting between two charsets that are not UTF-8 can convert text twice.";

/// Normalize text files: LF line endings, no BOM, no trailing whitespace.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, arg_required_else_help = true, after_help = AFTER_HELP)]
struct Args {
    /// File to normalize, or a mask such as `*.php`
    source: String,

    /// Output file, single-file mode only (default: rewrite the source)
    target: Option<PathBuf>,

    /// Process subdirectories whose names match the mask
    #[arg(short = 's', short_aliases = ['r', 'S', 'R'])]
    recurse: bool,

    /// Convert from one charset into another, e.g. `-c:windows-1251~utf-8`.
    /// The target defaults to utf-8
    #[arg(short = 'c', short_alias = 'C', long = "convert", value_name = "SRC[~DST]", value_parser = parse_conversion)]
    convert: Option<Conversion>,

    /// Only report what would change, without writing
    #[arg(short = 'i', short_alias = 'I', long = "inform")]
    inform_only: bool,

    /// Skip files that are not valid UTF-8 instead of decoding them lossily
    #[arg(long)]
    strict: bool,
}

impl Args {
    fn options(&self) -> NormalizeOptions {
        let decode_mode = if self.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lossy
        };
        let mut options = NormalizeOptions::new()
            .with_inform_only(self.inform_only)
            .with_recurse(self.recurse)
            .with_decode_mode(decode_mode);
        if let Some(conversion) = &self.convert {
            options =
                options.with_conversion(&conversion.source, Some(conversion.target.as_str()));
        }
        options
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = args.options();

    let result = if is_mask(&args.source) {
        if args.target.is_some() {
            eprintln!("Warning: output file is ignored when processing a mask.");
        }
        run_mask(&args.source, &options)
    } else {
        run_single_file(Path::new(&args.source), args.target.as_deref(), &options)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ Error::NotFound(_)) => {
            println!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
