//! Options controlling how files are normalized.

/// Charset a conversion targets when none is given.
pub const DEFAULT_TARGET_CHARSET: &str = "utf-8";

/// How raw bytes are turned into text before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Invalid UTF-8 sequences are replaced with U+FFFD; decoding never fails.
    #[default]
    Lossy,
    /// Invalid UTF-8 makes the file fail with [`crate::Error::Malformed`].
    Strict,
}

/// Normalization behavior for [`crate::normalize`] and [`crate::process_file`].
///
/// Built once per run and shared by reference across every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Charset the text is encoded with before conversion. `None` disables conversion.
    pub source_charset: Option<String>,
    /// Charset the encoded bytes are decoded with during conversion.
    pub target_charset: String,
    /// Report would-be changes without writing them.
    pub inform_only: bool,
    /// Descend into subdirectories when expanding a mask.
    pub recurse: bool,
    /// How raw bytes are decoded; see [`DecodeMode`].
    pub decode_mode: DecodeMode,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            source_charset: None,
            target_charset: DEFAULT_TARGET_CHARSET.to_string(),
            inform_only: false,
            recurse: false,
            decode_mode: DecodeMode::default(),
        }
    }
}

impl NormalizeOptions {
    /// Creates default options: no conversion, writes enabled, lossy decoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables charset conversion. Names are lower-cased; a missing target
    /// falls back to [`DEFAULT_TARGET_CHARSET`].
    pub fn with_conversion(mut self, source: &str, target: Option<&str>) -> Self {
        self.source_charset = Some(source.trim().to_lowercase());
        self.target_charset = target
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET_CHARSET.to_string());
        self
    }

    /// Enables/disables inform-only mode.
    pub fn with_inform_only(mut self, inform_only: bool) -> Self {
        self.inform_only = inform_only;
        self
    }

    /// Enables/disables recursion into subdirectories.
    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Sets the decode mode.
    pub fn with_decode_mode(mut self, decode_mode: DecodeMode) -> Self {
        self.decode_mode = decode_mode;
        self
    }
}
