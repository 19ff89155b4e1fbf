//! All error types for the textnorm crate.
//!
//! Only a few of these ever stop a run: I/O failures propagate, while charset
//! problems are carried inside a [`crate::Report`] and strict-mode decode
//! failures are reported per file by the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File \"{}\" not found.", .0.display())]
    NotFound(PathBuf),

    #[error("unknown charset `{0}`")]
    UnknownCharset(String),

    #[error("charset `{0}` cannot be used to encode text")]
    UnsupportedEncoder(String),

    #[error("text contains characters that cannot be encoded as {charset}")]
    Unmappable { charset: String },

    #[error("malformed {charset} input")]
    Malformed { charset: String },

    #[error("invalid mask `{mask}`: {message}")]
    InvalidMask { mask: String, message: String },
}

impl Error {
    /// Creates a new malformed-input error for the given charset name.
    pub fn malformed(charset: impl Into<String>) -> Self {
        Error::Malformed {
            charset: charset.into(),
        }
    }

    /// Creates a new unmappable-character error for the given charset name.
    pub fn unmappable(charset: impl Into<String>) -> Self {
        Error::Unmappable {
            charset: charset.into(),
        }
    }

    /// Creates a new invalid mask error
    pub fn invalid_mask(mask: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidMask {
            mask: mask.into(),
            message: message.into(),
        }
    }

    /// True for errors that concern one file's contents rather than the run.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Error::Malformed { .. }
                | Error::Unmappable { .. }
                | Error::UnknownCharset(_)
                | Error::UnsupportedEncoder(_)
        )
    }
}
