//! A single recorded file reference.

/// What: One file reference in the recent list plus its caller-defined attributes.
///
/// Details:
/// - `path` is the identity key: the list never holds two entries with the same `path`.
/// - `attributes` are not part of identity. `None` means "no attributes recorded", which
///   is distinct from `Some(vec![])` in memory. Both persist as "no attribute keys" and
///   decode back as `None`.
/// - The derived `PartialEq` compares the full value; use [`Entry::is_same_file`] for identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Absolute filesystem path as recorded.
    pub path: String,
    /// Ordered attribute values supplied on the last touch.
    pub attributes: Option<Vec<String>>,
}

impl Entry {
    /// What: Build an entry from a path and an optional attribute sequence.
    pub fn new(path: impl Into<String>, attributes: Option<Vec<String>>) -> Self {
        Self {
            path: path.into(),
            attributes,
        }
    }

    /// What: Identity comparison by path only.
    #[must_use]
    pub fn is_same_file(&self, other: &Self) -> bool {
        self.path == other.path
    }

    /// What: Attribute values as a slice, empty when none were recorded.
    #[must_use]
    pub fn attribute_values(&self) -> &[String] {
        self.attributes.as_deref().unwrap_or_default()
    }

    /// What: Return the display name of the entry.
    ///
    /// Output:
    /// - The last path component, or the whole path when it has none (e.g. `/`).
    ///
    /// Details:
    /// - Splits on both `/` and `\` so paths recorded on another platform still
    ///   produce a short label.
    #[must_use]
    pub fn file_name(&self) -> &str {
        let trimmed = self.path.trim_end_matches(['/', '\\']);
        match trimmed.rsplit(['/', '\\']).next() {
            Some(name) if !name.is_empty() => name,
            _ => &self.path,
        }
    }

    /// What: Check whether the file name ends with `suffix`.
    ///
    /// Details:
    /// - Plain string suffix test; an empty suffix matches every entry.
    #[must_use]
    pub fn extension_matches(&self, suffix: &str) -> bool {
        self.file_name().ends_with(suffix)
    }
}
