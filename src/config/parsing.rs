//! Line helpers for the `settings.conf` format.

/// What: Check if a line should be skipped (empty or comment).
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Output:
/// - `Some((key, value))` with the key normalised and inline comments stripped from
///   the value; `None` when the line has no `=`.
///
/// Details:
/// - Splits on the first `=` character.
/// - Keys are lowercased with `.`, `-` and spaces folded to `_`.
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    let (raw_key, raw_value) = trimmed.split_once('=')?;
    let key = normalize_key(raw_key);
    let value = strip_inline_comment(raw_value.trim()).to_string();
    Some((key, value))
}

/// What: Normalise a settings key so `Key-Scheme`, `key.scheme` and `key_scheme` agree.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

/// What: Remove inline comments from a configuration value.
///
/// Details:
/// - Strips trailing `//` sections and ` #` comments; a `#` glued to text is kept.
pub fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find(" //") {
        s = &s[..i];
    }
    if let Some(i) = s.find(" #") {
        s = &s[..i];
    }
    s.trim()
}
