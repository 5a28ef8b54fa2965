//! Encoding of recent entries into a flat string-keyed property store.
//!
//! Entry `i` (0-based, most recent first) stores its path under attribute index 0
//! and its attributes under indices `1..`. How `(i, j)` becomes a key depends on the
//! [`KeyScheme`]:
//!
//! - `Concatenated` writes the decimal digits of `i` and `j` back to back (`"10"` is
//!   entry 1, attribute 0). Keys stay unique only while `i` is a single digit, so this
//!   scheme holds at most 10 entries. Files without a `format` key use it.
//! - `Delimited` writes `"{i}.{j}"` and marks the file with `format=2`. Saving a
//!   legacy file with this scheme migrates it; the marker keeps later loads on it.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::recent::Entry;

pub mod properties;

pub use properties::Properties;

/// Marker key naming the on-disk key scheme version.
pub const FORMAT_KEY: &str = "format";
/// Marker value for [`KeyScheme::Delimited`].
pub const DELIMITED_FORMAT_VERSION: &str = "2";
/// Highest entry count the concatenated scheme can address without collisions.
pub const CONCATENATED_MAX_CAPACITY: usize = 10;

/// What: Key layout used to store entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyScheme {
    /// Legacy `"{i}{j}"` keys without a separator.
    #[default]
    Concatenated,
    /// Versioned `"{i}.{j}"` keys.
    Delimited,
}

impl KeyScheme {
    /// What: Build the key for entry `entry` and attribute slot `slot` (0 = path).
    #[must_use]
    pub fn key(self, entry: usize, slot: usize) -> String {
        match self {
            Self::Concatenated => format!("{entry}{slot}"),
            Self::Delimited => format!("{entry}.{slot}"),
        }
    }

    /// What: Largest capacity this scheme can store unambiguously; `None` when unbounded.
    #[must_use]
    pub const fn max_capacity(self) -> Option<usize> {
        match self {
            Self::Concatenated => Some(CONCATENATED_MAX_CAPACITY),
            Self::Delimited => None,
        }
    }

    /// What: Reject capacities the scheme cannot hold.
    ///
    /// # Errors
    /// - `ConfigError::CapacityExceedsScheme` when `capacity` is above [`Self::max_capacity`].
    pub fn check_capacity(self, capacity: NonZeroUsize) -> Result<(), ConfigError> {
        match self.max_capacity() {
            Some(max) if capacity.get() > max => Err(ConfigError::CapacityExceedsScheme {
                capacity: capacity.get(),
                scheme: self,
            }),
            _ => Ok(()),
        }
    }

    /// Settings/CLI spelling of the scheme.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Concatenated => "concatenated",
            Self::Delimited => "delimited",
        }
    }

    /// What: Detect which scheme a stored file uses.
    ///
    /// Output:
    /// - `Some(Delimited)` for `format=2`, `Some(Concatenated)` without a marker,
    ///   `None` for an unknown marker value.
    #[must_use]
    pub fn detect(props: &Properties) -> Option<Self> {
        match props.get(FORMAT_KEY) {
            None => Some(Self::Concatenated),
            Some(v) if v.trim() == DELIMITED_FORMAT_VERSION => Some(Self::Delimited),
            Some(_) => None,
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_config_key())
    }
}

impl FromStr for KeyScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concatenated" | "concat" | "legacy" | "1" => Ok(Self::Concatenated),
            "delimited" | "dotted" | "v2" | "2" => Ok(Self::Delimited),
            _ => Err(ConfigError::InvalidValue {
                key: "key_scheme".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// What: Encode entries (most recent first) into a fresh property store.
///
/// Inputs:
/// - `entries`: Entries in front-to-back order.
/// - `scheme`: Key layout to write.
///
/// Output:
/// - Store holding only the keys for these entries (full overwrite semantics).
///
/// Details:
/// - Attribute keys start at 1; `None` and empty attribute sequences write no attribute keys.
pub fn encode<'a>(entries: impl IntoIterator<Item = &'a Entry>, scheme: KeyScheme) -> Properties {
    let mut props = Properties::new();
    if scheme == KeyScheme::Delimited {
        props.set(FORMAT_KEY, DELIMITED_FORMAT_VERSION);
    }
    for (i, entry) in entries.into_iter().enumerate() {
        props.set(scheme.key(i, 0), entry.path.as_str());
        for (j, value) in entry.attribute_values().iter().enumerate() {
            props.set(scheme.key(i, j + 1), value.as_str());
        }
    }
    props
}

/// What: Outcome of decoding a property store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Entries in front-to-back order.
    pub entries: Vec<Entry>,
    /// Scheme the store was written with; `None` for an unknown `format` marker.
    pub scheme: Option<KeyScheme>,
    /// Stored keys that were not consumed (past a gap, past capacity, or unknown).
    pub ignored_keys: Vec<String>,
}

/// What: Decode entries from a property store.
///
/// Inputs:
/// - `props`: Parsed storage file.
/// - `capacity`: Maximum number of entries to recover.
///
/// Output:
/// - [`Decoded`] with the recovered entries and any leftover keys.
///
/// Details:
/// - Scans entry indices from 0 and stops at the first missing path key; entries
///   after a gap are not recovered.
/// - An empty path value is structurally invalid and also stops the scan.
/// - Attributes are read from slot 1 upward until the first missing slot.
/// - The concatenated scheme never scans past its own ceiling, whatever `capacity` is.
/// - Never fails; problems are logged and reflected in `ignored_keys`.
#[must_use]
pub fn decode(props: &Properties, capacity: NonZeroUsize) -> Decoded {
    let Some(scheme) = KeyScheme::detect(props) else {
        tracing::warn!(
            format = props.get(FORMAT_KEY).unwrap_or_default(),
            "[Codec] Unknown storage format marker; ignoring stored entries"
        );
        return Decoded {
            entries: Vec::new(),
            scheme: None,
            ignored_keys: props.keys().map(str::to_string).collect(),
        };
    };
    let limit = scheme
        .max_capacity()
        .map_or(capacity.get(), |max| max.min(capacity.get()));

    let mut consumed: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();
    for i in 0..limit {
        let path_key = scheme.key(i, 0);
        let Some(path) = props.get(&path_key) else {
            break;
        };
        if path.trim().is_empty() {
            tracing::warn!(key = %path_key, "[Codec] Empty path value; stopping decode");
            break;
        }
        let mut attributes = Vec::new();
        let mut slot = 1;
        loop {
            let key = scheme.key(i, slot);
            let Some(value) = props.get(&key) else {
                break;
            };
            attributes.push(value.to_string());
            consumed.insert(key);
            slot += 1;
        }
        consumed.insert(path_key);
        let attributes = (!attributes.is_empty()).then_some(attributes);
        entries.push(Entry::new(path, attributes));
    }

    let ignored_keys: Vec<String> = props
        .keys()
        .filter(|k| *k != FORMAT_KEY && !consumed.contains(*k))
        .map(str::to_string)
        .collect();
    if !ignored_keys.is_empty() {
        tracing::warn!(
            recovered = entries.len(),
            ignored = ignored_keys.len(),
            keys = ?ignored_keys,
            "[Codec] Stored keys beyond a gap, over capacity, or unrecognised were ignored"
        );
    }
    tracing::debug!(
        scheme = %scheme,
        entries = entries.len(),
        "[Codec] Decoded recent entries"
    );
    Decoded {
        entries,
        scheme: Some(scheme),
        ignored_keys,
    }
}
