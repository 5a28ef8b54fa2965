//! Error kinds surfaced by the recent-files store and its configuration.

use std::fmt;
use std::path::PathBuf;

use crate::codec::KeyScheme;

/// What: Errors raised by `RecentFiles` operations.
///
/// Details:
/// - `touch` and `remove` never fail on the in-memory model; every failure here comes
///   from writing the storage file, from a storage format that must not be overwritten,
///   or from invalid configuration.
/// - On `Persistence` the in-memory list has already changed and is not rolled back.
#[derive(Debug)]
pub enum RecentError {
    /// The storage file could not be created or rewritten.
    Persistence {
        /// Storage file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The storage file carries a format marker this version cannot read.
    ///
    /// The file is left untouched until the list is cleared or migrated explicitly.
    UnknownFormat {
        /// Storage file that was protected.
        path: PathBuf,
        /// Value of the stored `format` key.
        marker: String,
    },
    /// Settings were rejected before the store was opened.
    Config(ConfigError),
}

impl RecentError {
    /// What: Wrap an I/O error raised while writing `path`.
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for RecentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistence { path, source } => {
                write!(f, "failed to persist {}: {source}", path.display())
            }
            Self::UnknownFormat { path, marker } => write!(
                f,
                "{} uses unknown storage format {marker:?}; refusing to overwrite it \
                 (run `clear` or `migrate` to replace it)",
                path.display()
            ),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for RecentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            Self::UnknownFormat { .. } => None,
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for RecentError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// What: Configuration values that cannot be used to open a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be a positive integer.
    CapacityZero,
    /// The key scheme cannot address this many entries without key collisions.
    CapacityExceedsScheme {
        /// Requested capacity.
        capacity: usize,
        /// Scheme that cannot hold it.
        scheme: KeyScheme,
    },
    /// A settings value could not be parsed.
    InvalidValue {
        /// Normalised settings key.
        key: String,
        /// Raw value as written.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityZero => write!(f, "capacity must be at least 1"),
            Self::CapacityExceedsScheme { capacity, scheme } => {
                let max = scheme.max_capacity().unwrap_or(usize::MAX);
                write!(
                    f,
                    "capacity {capacity} exceeds the {scheme} key scheme limit of {max}; \
                     use key_scheme = delimited"
                )
            }
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value {value:?} for setting \"{key}\"")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
