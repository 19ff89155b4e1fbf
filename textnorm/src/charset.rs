//! Charset lookup, UTF-8 decoding and text transcoding on top of `encoding_rs`.

use encoding_rs::{Encoding, UTF_8};

use crate::{error::Error, options::DecodeMode};

/// Text decoded from raw file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// False when lossy decoding had to replace malformed sequences.
    pub clean: bool,
}

/// Decodes bytes as UTF-8 without consuming a BOM, so the caller decides
/// what to do with a leading U+FEFF.
pub fn decode_utf8(bytes: &[u8], mode: DecodeMode) -> Result<Decoded, Error> {
    match mode {
        DecodeMode::Lossy => {
            let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
            Ok(Decoded {
                text: text.into_owned(),
                clean: !had_errors,
            })
        }
        DecodeMode::Strict => UTF_8
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| Decoded {
                text: text.into_owned(),
                clean: true,
            })
            .ok_or_else(|| Error::malformed(UTF_8.name())),
    }
}

/// Resolves a charset name through the WHATWG label table.
///
/// Names such as `latin-1` that only exist there without punctuation are
/// retried with `-` and `_` removed.
pub fn lookup(label: &str) -> Result<&'static Encoding, Error> {
    let label = label.trim();
    Encoding::for_label(label.as_bytes())
        .or_else(|| {
            let compact: String = label.chars().filter(|c| !matches!(c, '-' | '_')).collect();
            Encoding::for_label(compact.as_bytes())
        })
        .ok_or_else(|| Error::UnknownCharset(label.to_string()))
}

/// Whether `label` names UTF-8. Unknown labels are not UTF-8.
pub fn is_utf8(label: &str) -> bool {
    lookup(label).is_ok_and(|encoding| encoding == UTF_8)
}

/// Encodes `text` with `source`, then decodes the resulting bytes with `target`.
///
/// Fails on unknown labels, on characters `source` cannot represent and on
/// byte sequences `target` rejects. Nothing is replaced silently.
pub fn transcode(text: &str, source: &str, target: &str) -> Result<String, Error> {
    let from = lookup(source)?;
    let to = lookup(target)?;

    // encoding_rs encodes UTF-16 and `replacement` as UTF-8
    if from.output_encoding() != from {
        return Err(Error::UnsupportedEncoder(source.to_string()));
    }

    let (bytes, _, unmappable) = from.encode(text);
    if unmappable {
        return Err(Error::unmappable(from.name()));
    }

    to.decode_without_bom_handling_and_without_replacement(&bytes)
        .map(|decoded| decoded.into_owned())
        .ok_or_else(|| Error::malformed(to.name()))
}
