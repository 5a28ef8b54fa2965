//! Line-oriented `key=value` store compatible with `java.util.Properties` files.
//!
//! Reading never fails: malformed escapes are kept literally and every line yields
//! at most one pair. Writing escapes separators, comment markers, control characters
//! and non-ASCII text so the file stays readable by Latin-1 `java.util.Properties` loaders.

use std::collections::HashMap;
use std::fmt::Write as _;

/// What: Ordered string-to-string map with `Properties` text round-tripping.
///
/// Details:
/// - Keeps insertion order so rendered files list entries in encoding order.
/// - Setting an existing key replaces its value in place; on parse, later duplicates win.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    /// Pairs in insertion order.
    pairs: Vec<(String, String)>,
    /// Key to index into `pairs`.
    index: HashMap<String, usize>,
}

impl Properties {
    /// What: Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .and_then(|&i| self.pairs.get(i))
            .map(|(_, v)| v.as_str())
    }

    /// What: Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(&i) = self.index.get(&key) {
            self.pairs[i].1 = value;
            return;
        }
        self.index.insert(key.clone(), self.pairs.len());
        self.pairs.push((key, value));
    }

    /// What: Drop every pair.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.index.clear();
    }

    /// What: Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// What: Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// What: Parse `Properties` text.
    ///
    /// Inputs:
    /// - `content`: File contents.
    ///
    /// Output:
    /// - Store holding every pair found.
    ///
    /// Details:
    /// - Skips blank lines and lines whose first non-blank character is `#` or `!`.
    /// - Joins lines ending in an odd number of backslashes with the next line.
    /// - The key ends at the first unescaped `=`, `:` or whitespace.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut props = Self::new();
        for line in logical_lines(content) {
            let (key, value) = split_pair(&line);
            props.set(unescape(key), unescape(value));
        }
        props
    }

    /// What: Render the store as `Properties` text.
    ///
    /// Inputs:
    /// - `header`: Optional comment written as the first line (without the `#`).
    ///
    /// Output:
    /// - Text with one `key=value` line per pair and a trailing newline.
    #[must_use]
    pub fn render(&self, header: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(h) = header {
            for line in h.lines() {
                let _ = writeln!(out, "#{line}");
            }
        }
        for (key, value) in &self.pairs {
            escape_into(&mut out, key, true);
            out.push('=');
            escape_into(&mut out, value, false);
            out.push('\n');
        }
        out
    }
}

/// What: Count trailing backslashes of `s`.
fn trailing_backslashes(s: &str) -> usize {
    s.chars().rev().take_while(|&c| c == '\\').count()
}

/// What: Collapse physical lines into logical, non-comment lines.
fn logical_lines(content: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut pending: Option<String> = None;
    for raw in content.lines() {
        let line = raw.trim_start_matches([' ', '\t', '\x0c']);
        let mut current = match pending.take() {
            Some(mut acc) => {
                acc.push_str(line);
                acc
            }
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                line.to_string()
            }
        };
        if trailing_backslashes(&current) % 2 == 1 {
            current.pop();
            pending = Some(current);
        } else {
            out.push(current);
        }
    }
    if let Some(last) = pending {
        out.push(last);
    }
    out
}

/// What: Split a logical line into raw (still escaped) key and value.
fn split_pair(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut hit_separator = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                hit_separator = true;
                break;
            }
            ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }
    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if hit_separator {
        rest = &rest[1..];
    } else {
        rest = rest.trim_start_matches([' ', '\t', '\x0c']);
        if let Some(stripped) = rest.strip_prefix(['=', ':']) {
            rest = stripped;
        }
    }
    (key, rest.trim_start_matches([' ', '\t', '\x0c']))
}

/// What: Resolve backslash escapes, including `\uXXXX` UTF-16 code units.
///
/// Details:
/// - Surrogate pairs spelled as two `\u` escapes are joined; unpaired ones become U+FFFD.
/// - A malformed `\u` escape is kept as the literal `u`.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut out, &mut units);
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            break;
        };
        if next == 'u' {
            let hex: String = chars.clone().take(4).collect();
            if hex.len() == 4
                && hex.bytes().all(|b| b.is_ascii_hexdigit())
                && let Ok(unit) = u16::from_str_radix(&hex, 16)
            {
                units.push(unit);
                for _ in 0..4 {
                    chars.next();
                }
                continue;
            }
        }
        flush_units(&mut out, &mut units);
        out.push(match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\x0c',
            other => other,
        });
    }
    flush_units(&mut out, &mut units);
    out
}

/// What: Append buffered UTF-16 code units to `out`.
fn flush_units(out: &mut String, units: &mut Vec<u16>) {
    if !units.is_empty() {
        out.push_str(&String::from_utf16_lossy(units));
        units.clear();
    }
}

/// What: Append `text` to `out` with `Properties` escaping.
///
/// Inputs:
/// - `is_key`: Keys escape every space; values only a leading one.
fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            other => {
                let mut buf = [0u16; 2];
                for unit in other.encode_utf16(&mut buf) {
                    let _ = write!(out, "\\u{unit:04X}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Properties;

    #[test]
    /// What: Parse comments, separators, whitespace and continuation lines.
    ///
    /// Inputs:
    /// - Mixed content using `=`, `:` and whitespace separators.
    ///
    /// Output:
    /// - Each key maps to its unescaped value; comments are ignored.
    fn parse_handles_separators_and_comments() {
        let text = "#Sat Oct 18 10:00:00 UTC 2026\n\
                    ! bang comment\n\
                    \n\
                    00=/home/u/a.txt\n\
                    01 : first attr\n\
                    02   spaced value\n\
                    10=/home/u/long\\\n    \\ name.txt\n";
        let props = Properties::parse(text);
        assert_eq!(props.len(), 4);
        assert_eq!(props.get("00"), Some("/home/u/a.txt"));
        assert_eq!(props.get("01"), Some("first attr"));
        assert_eq!(props.get("02"), Some("spaced value"));
        assert_eq!(props.get("10"), Some("/home/u/long name.txt"));
    }

    #[test]
    /// What: Rendering escapes Windows paths and separators the way `java.util.Properties` does.
    fn render_escapes_specials() {
        let mut props = Properties::new();
        props.set("00", r"C:\docs\a=b.txt");
        props.set("01", " lead");
        let text = props.render(None);
        assert_eq!(text, "00=C\\:\\\\docs\\\\a\\=b.txt\n01=\\ lead\n");
        assert_eq!(Properties::parse(&text), props);
    }

    #[test]
    /// What: Non-ASCII text is written as `\uXXXX` and read back intact, including astral chars.
    fn unicode_escapes() {
        let mut props = Properties::new();
        props.set("00", "/home/ü/数据/🎵.mp3");
        let text = props.render(Some("header"));
        assert!(text.starts_with("#header\n"));
        assert!(text.is_ascii());
        assert!(text.contains("\\u00FC"));
        let back = Properties::parse(&text);
        assert_eq!(back.get("00"), Some("/home/ü/数据/🎵.mp3"));
    }

    #[test]
    /// What: Later duplicate keys win and malformed escapes do not panic.
    fn duplicates_and_malformed() {
        let props = Properties::parse("00=a\n00=b\n01=\\uZZ\nlonely\n");
        assert_eq!(props.get("00"), Some("b"));
        assert_eq!(props.get("01"), Some("uZZ"));
        assert_eq!(props.get("lonely"), Some(""));
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["00", "01", "lonely"]);
    }

    #[test]
    /// What: `\u` escapes accept exactly four hex digits.
    ///
    /// Inputs:
    /// - A sign-prefixed escape (`\u+041`) and a valid one (`\u0041`).
    ///
    /// Output:
    /// - The signed form is kept literally as `u+041`; the valid one decodes to `A`.
    fn unicode_escape_rejects_sign_prefix() {
        let props = Properties::parse("00=\\u+041x\n01=\\u0041x\n");
        assert_eq!(props.get("00"), Some("u+041x"));
        assert_eq!(props.get("01"), Some("Ax"));
    }
}
