use textnorm::DEFAULT_TARGET_CHARSET;

/// Charset pair given with `-c:src[~dst]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source: String,
    pub target: String,
}

/// Parse the value of the conversion flag.
///
/// Accepts `src`, `src~dst`, and the same with the leading `:` that the
/// attached form `-c:src~dst` leaves in the value. Names are lower-cased.
pub fn parse_conversion(value: &str) -> Result<Conversion, String> {
    let value = value.strip_prefix(':').unwrap_or(value);
    let (source, target) = match value.split_once('~') {
        Some((source, target)) => (source, Some(target)),
        None => (value, None),
    };

    let source = source.trim().to_lowercase();
    if source.is_empty() {
        return Err(format!(
            "Missing source charset in '{}'. Expected SRC[~DST], e.g. windows-1251~utf-8",
            value
        ));
    }

    let target = target
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TARGET_CHARSET.to_string());

    Ok(Conversion { source, target })
}
