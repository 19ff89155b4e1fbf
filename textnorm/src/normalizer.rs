//! The per-file normalization pipeline.
//!
//! Raw bytes go through five steps, each working on the text left by the
//! previous one:
//!
//! 1. lossy (or strict) UTF-8 decoding,
//! 2. removal of leading byte-order marks,
//! 3. line-ending unification to LF,
//! 4. trailing whitespace trimming,
//! 5. optional charset conversion.
//!
//! Whether the result counts as a change is decided by comparing character
//! counts before step 3 and after step 5, plus one structural flag for files
//! that only used CR line endings. Edits that keep the character count (a
//! same-length charset substitution, for instance) are not changes.

use std::borrow::Cow;

use crate::{
    charset::{self, Decoded},
    error::Error,
    options::NormalizeOptions,
};

/// The byte-order mark as it appears after decoding.
pub const BOM: char = '\u{FEFF}';

/// What happened in the charset conversion step.
#[derive(Debug, Default)]
pub enum ConversionOutcome {
    /// No source charset was configured.
    #[default]
    NotRequested,
    /// The double-conversion guard decided the text must be left alone.
    Skipped,
    Applied,
    /// Conversion failed; the text is what it was before the step.
    Failed(Error),
}

impl ConversionOutcome {
    pub fn error(&self) -> Option<&Error> {
        match self {
            ConversionOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Output of [`normalize`].
#[derive(Debug, Default)]
pub struct Normalized {
    pub text: String,
    /// Characters after BOM removal, before line-ending unification.
    pub original_size: usize,
    /// Characters in `text`.
    pub result_size: usize,
    pub changed: bool,
    pub conversion: ConversionOutcome,
}

/// Normalizes raw file contents.
///
/// Has no side effects. The only possible error is a strict-mode decode
/// failure; in lossy mode this always succeeds.
///
/// # Example
///
/// ```rust
/// use textnorm::{NormalizeOptions, normalize};
///
/// let out = normalize(b"a\rb\rc", &NormalizeOptions::new())?;
/// assert_eq!(out.text, "a\nb\nc");
/// assert!(out.changed);
/// # Ok::<(), textnorm::Error>(())
/// ```
pub fn normalize(bytes: &[u8], options: &NormalizeOptions) -> Result<Normalized, Error> {
    if bytes.is_empty() {
        return Ok(Normalized::default());
    }

    let Decoded { text, clean } = charset::decode_utf8(bytes, options.decode_mode)?;
    let text = strip_bom(&text);

    let original_size = text.chars().count();
    let (text, structural) = unify_line_endings(text);
    let text = trim_trailing_whitespace(&text);
    let (text, conversion) = convert_charset(text, clean, options);
    let result_size = text.chars().count();

    Ok(Normalized {
        text,
        original_size,
        result_size,
        changed: structural || original_size != result_size,
        conversion,
    })
}

/// Removes leading byte-order marks. Marks later in the text are content.
pub fn strip_bom(text: &str) -> &str {
    text.trim_start_matches(BOM)
}

/// Converts CR and CRLF line endings to LF.
///
/// Text with CRs but no LF at all uses old Mac line endings: every CR becomes
/// an LF and the returned flag is set, since that swap keeps the length
/// unchanged. Otherwise every CR is dropped, which turns CRLF into LF and
/// removes stray CRs.
pub fn unify_line_endings(text: &str) -> (Cow<'_, str>, bool) {
    if !text.contains('\r') {
        return (Cow::Borrowed(text), false);
    }
    if !text.contains('\n') {
        return (Cow::Owned(text.replace('\r', "\n")), true);
    }
    (Cow::Owned(text.replace('\r', "")), false)
}

/// Strips trailing whitespace from every line and drops trailing empty lines.
///
/// The result never ends with a line feed.
pub fn trim_trailing_whitespace(text: &str) -> String {
    let mut trimmed = text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n");
    let len = trimmed.trim_end_matches('\n').len();
    trimmed.truncate(len);
    trimmed
}

fn convert_charset(
    text: String,
    clean: bool,
    options: &NormalizeOptions,
) -> (String, ConversionOutcome) {
    let Some(source) = options.source_charset.as_deref() else {
        return (text, ConversionOutcome::NotRequested);
    };
    let target = options.target_charset.as_str();

    // Already valid UTF-8 going to UTF-8, or "UTF-8" input that is not UTF-8.
    if (clean && charset::is_utf8(target)) || (!clean && charset::is_utf8(source)) {
        return (text, ConversionOutcome::Skipped);
    }

    match charset::transcode(&text, source, target) {
        Ok(converted) => (converted, ConversionOutcome::Applied),
        Err(err) => (text, ConversionOutcome::Failed(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DecodeMode;

    fn run(input: &[u8]) -> Normalized {
        normalize(input, &NormalizeOptions::new()).unwrap()
    }

    #[test]
    fn test_empty_input_is_unchanged() {
        let out = run(b"");
        assert_eq!(out.text, "");
        assert_eq!(out.original_size, 0);
        assert_eq!(out.result_size, 0);
        assert!(!out.changed);
    }

    #[test]
    fn test_cr_only_line_endings_are_flagged() {
        let out = run(b"a\rb\rc");
        assert_eq!(out.text, "a\nb\nc");
        assert_eq!(out.original_size, 5);
        assert_eq!(out.result_size, 5);
        assert!(out.changed);
    }

    #[test]
    fn test_mixed_line_endings_drop_every_cr() {
        let (text, structural) = unify_line_endings("a\r\nb\nc\r\n");
        assert_eq!(text, "a\nb\nc\n");
        assert!(!structural);

        let (text, _) = unify_line_endings("a\rb\nc");
        assert_eq!(text, "ab\nc");

        let out = run(b"a\r\nb\nc\r\n");
        assert_eq!(out.text, "a\nb\nc");
        assert_eq!(out.original_size, 8);
        assert_eq!(out.result_size, 5);
        assert!(out.changed);
    }

    #[test]
    fn test_lf_only_text_is_borrowed() {
        let (text, structural) = unify_line_endings("a\nb");
        assert!(matches!(text, Cow::Borrowed("a\nb")));
        assert!(!structural);
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let out = run(b"foo   \nbar\t\n");
        assert_eq!(out.text, "foo\nbar");
        assert!(out.changed);
    }

    #[test]
    fn test_trim_handles_unicode_whitespace_and_blank_tail() {
        assert_eq!(trim_trailing_whitespace("a\u{3000}\n\u{A0}b \n\n\n"), "a\n\u{A0}b");
        assert_eq!(trim_trailing_whitespace("  \n\t\n"), "");
        assert_eq!(trim_trailing_whitespace("\n\nx"), "\n\nx");
    }

    #[test]
    fn test_clean_file_is_unchanged() {
        let out = run(b"fn main() {\n    println!(\"hi\");\n}");
        assert!(!out.changed);
        assert_eq!(out.original_size, out.result_size);
    }

    #[test]
    fn test_bom_is_removed_but_not_counted() {
        let out = run(b"\xEF\xBB\xBFhello");
        assert_eq!(out.text, "hello");
        assert_eq!(out.original_size, 5);
        assert!(!out.changed);

        let out = run(b"\xEF\xBB\xBFhello \r\n");
        assert_eq!(out.text, "hello");
        assert!(out.changed);
    }

    #[test]
    fn test_repeated_leading_boms_are_stripped() {
        assert_eq!(strip_bom("\u{FEFF}\u{FEFF}x"), "x");
        assert_eq!(strip_bom("x\u{FEFF}"), "x\u{FEFF}");
    }

    #[test]
    fn test_shrinking_edits_are_changes() {
        let out = run(b"a \nb\r\n");
        assert_eq!(out.text, "a\nb");
        assert_eq!(out.original_size, 6);
        assert_eq!(out.result_size, 3);
        assert!(out.changed);

        let out = run(b"a\t\nb ");
        assert_eq!(out.text, "a\nb");
        assert!(out.changed);
    }

    #[test]
    fn test_lossy_decode_substitutes() {
        let out = run(b"caf\xE9 \n");
        assert_eq!(out.text, "caf\u{FFFD}");
        assert!(out.changed);
    }

    #[test]
    fn test_strict_decode_fails() {
        let options = NormalizeOptions::new().with_decode_mode(DecodeMode::Strict);
        let err = normalize(b"caf\xE9", &options).unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_conversion_not_requested() {
        let out = run(b"x");
        assert!(matches!(out.conversion, ConversionOutcome::NotRequested));
        assert!(out.conversion.error().is_none());
    }

    #[test]
    fn test_guard_skips_clean_utf8_to_utf8() {
        let options = NormalizeOptions::new().with_conversion("latin-1", None);
        let out = normalize("Ã© déjà".as_bytes(), &options).unwrap();
        assert!(matches!(out.conversion, ConversionOutcome::Skipped));
        assert_eq!(out.text, "Ã© déjà");
        assert!(!out.changed);
    }

    #[test]
    fn test_guard_skips_broken_utf8_source() {
        let options = NormalizeOptions::new().with_conversion("utf-8", Some("windows-1251"));
        let out = normalize(b"\xE9t\xE9", &options).unwrap();
        assert!(matches!(out.conversion, ConversionOutcome::Skipped));
    }

    #[test]
    fn test_conversion_applied() {
        let options = NormalizeOptions::new().with_conversion("utf-8", Some("windows-1252"));
        let out = normalize("é\r\n".as_bytes(), &options).unwrap();
        assert!(matches!(out.conversion, ConversionOutcome::Applied));
        assert_eq!(out.text, "Ã©");
        assert_eq!(out.original_size, 3);
        assert_eq!(out.result_size, 2);
        assert!(out.changed);
    }

    #[test]
    fn test_same_length_conversion_is_not_a_change() {
        let options = NormalizeOptions::new().with_conversion("koi8-r", Some("windows-1251"));
        let out = normalize("привет".as_bytes(), &options).unwrap();
        assert!(matches!(out.conversion, ConversionOutcome::Applied));
        assert_ne!(out.text, "привет");
        assert_eq!(out.result_size, 6);
        assert!(!out.changed);
    }

    #[test]
    fn test_failed_conversion_keeps_previous_steps() {
        let options = NormalizeOptions::new().with_conversion("latin-1", None);
        let out = normalize(b"caf\xE9  \r\n", &options).unwrap();
        assert!(matches!(
            out.conversion.error(),
            Some(Error::Unmappable { .. })
        ));
        assert_eq!(out.text, "caf\u{FFFD}");
        assert!(out.changed);
    }

    #[test]
    fn test_unknown_charset_fails_conversion_only() {
        let options = NormalizeOptions::new().with_conversion("klingon", Some("windows-1252"));
        let out = normalize(b"abc \n", &options).unwrap();
        assert!(matches!(
            out.conversion.error(),
            Some(Error::UnknownCharset(name)) if name == "klingon"
        ));
        assert_eq!(out.text, "abc");
    }
}
