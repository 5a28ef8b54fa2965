use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use super::parsing::{parse_key_value, skip_comment_or_empty};
use super::paths::{default_storage_path, resolve_settings_config_path};
use crate::codec::KeyScheme;
use crate::error::ConfigError;
use crate::menu::IconMap;
use crate::recent::DEFAULT_CAPACITY;
use crate::store::OpenOptions;

/// Skeleton written when no settings file exists yet.
pub const SETTINGS_SKELETON_CONTENT: &str = "\
# recentfiles settings
#
# Maximum number of remembered files.
# The concatenated key scheme stores at most 10 entries.
capacity = 10

# Storage file. Leave empty for ~/.config/recentfiles/lists/recent_files.properties
storage_path =

# Key layout of the storage file: concatenated (legacy) or delimited
key_scheme = concatenated

# Icons by file-name suffix, first match wins. An empty suffix matches every file.
# icons = .rs:rust, .md:markdown, :file
";

/// What: Construction-time configuration for the recent-files store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Requested capacity; validated to be positive.
    pub capacity: usize,
    /// Storage file; `None` means the default location.
    pub storage_path: Option<PathBuf>,
    /// Key layout for writes.
    pub key_scheme: KeyScheme,
    /// Icon rules passed through to the presenter.
    pub icons: IconMap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            storage_path: None,
            key_scheme: KeyScheme::default(),
            icons: IconMap::new(),
        }
    }
}

impl Settings {
    /// What: Validate settings and turn them into store options.
    ///
    /// Output:
    /// - `OpenOptions` with a non-zero capacity and a resolved storage path.
    ///
    /// # Errors
    /// - `ConfigError::CapacityZero` for capacity 0.
    /// - `ConfigError::CapacityExceedsScheme` when the key scheme cannot hold the capacity.
    pub fn validate(&self) -> Result<OpenOptions, ConfigError> {
        let capacity = NonZeroUsize::new(self.capacity).ok_or(ConfigError::CapacityZero)?;
        self.key_scheme.check_capacity(capacity)?;
        let storage_path = self
            .storage_path
            .clone()
            .unwrap_or_else(default_storage_path);
        Ok(OpenOptions {
            capacity,
            storage_path,
            key_scheme: self.key_scheme,
        })
    }
}

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: File contents.
///
/// Output:
/// - Settings with every recognised key applied over the defaults.
///
/// Details:
/// - Unknown keys are ignored; unparsable values are logged and leave the default.
/// - `icons` may appear more than once; rules accumulate in file order.
/// - `storage_path` accepts a leading `~/` for the home directory.
pub fn parse_settings(content: &str) -> Settings {
    let mut settings = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "capacity" | "max_records" | "max_entries" => match val.parse::<usize>() {
                Ok(v) => settings.capacity = v,
                Err(_) => warn_invalid(&key, &val),
            },
            "storage_path" | "storage" | "config_file" => {
                settings.storage_path = (!val.is_empty()).then(|| expand_home(&val));
            }
            "key_scheme" | "format" => match val.parse::<KeyScheme>() {
                Ok(v) => settings.key_scheme = v,
                Err(_) => warn_invalid(&key, &val),
            },
            "icons" | "icon_types" => {
                settings.icons.extend_from_spec(&val);
            }
            _ => {
                tracing::trace!(key = %key, "[Config] Ignoring unknown setting");
            }
        }
    }
    settings
}

/// What: Log an unparsable settings value.
fn warn_invalid(key: &str, value: &str) {
    let err = ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    tracing::warn!(error = %err, "[Config] Keeping default");
}

/// What: Expand a leading `~/` using `$HOME`.
fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Ok(home) = std::env::var("HOME")
    {
        return Path::new(&home).join(rest);
    }
    PathBuf::from(raw)
}

/// What: Load settings from `path`, or from the resolved default location.
///
/// Output:
/// - Parsed settings; defaults when no file exists or it cannot be read.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(p) = path.map(Path::to_path_buf).or_else(resolve_settings_config_path) else {
        tracing::debug!("[Config] No settings file found; using defaults");
        return Settings::default();
    };
    match fs::read_to_string(&p) {
        Ok(content) => {
            tracing::debug!(path = %p.display(), "[Config] Loaded settings");
            parse_settings(&content)
        }
        Err(e) => {
            tracing::warn!(
                path = %p.display(),
                error = %e,
                "[Config] Failed to read settings; using defaults"
            );
            Settings::default()
        }
    }
}

/// What: Write the settings skeleton to `path` if no file exists there.
///
/// Output:
/// - `true` when a new file was written.
pub fn ensure_settings_file(path: &Path) -> bool {
    if path.exists() {
        return false;
    }
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match fs::write(path, SETTINGS_SKELETON_CONTENT) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "[Config] Wrote settings skeleton");
            true
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "[Config] Failed to write settings skeleton"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Recognised keys and aliases are applied; bad values keep defaults.
    ///
    /// Inputs:
    /// - Settings text with comments, aliases, an invalid capacity line and two icon lines.
    ///
    /// Output:
    /// - Last valid capacity wins, scheme and storage are set, icon rules accumulate in order.
    fn parse_settings_applies_keys() {
        let text = "\
# comment
capacity = 7
max-records = many
key.scheme = delimited   # v2
storage_path = /var/tmp/recent.properties
icons = .rs:rust
icons = :file // catch-all
unknown = 1
";
        let s = parse_settings(text);
        assert_eq!(s.capacity, 7);
        assert_eq!(s.key_scheme, KeyScheme::Delimited);
        assert_eq!(
            s.storage_path,
            Some(PathBuf::from("/var/tmp/recent.properties"))
        );
        assert_eq!(s.icons.len(), 2);
    }

    #[test]
    /// What: The skeleton parses back to the defaults.
    fn skeleton_matches_defaults() {
        assert_eq!(parse_settings(SETTINGS_SKELETON_CONTENT), Settings::default());
    }

    #[test]
    /// What: Validation rejects zero capacity and capacities beyond the legacy ceiling.
    fn validate_enforces_capacity_rules() {
        let mut s = Settings {
            storage_path: Some(PathBuf::from("/tmp/x.properties")),
            ..Settings::default()
        };
        s.capacity = 0;
        assert_eq!(s.validate().err(), Some(ConfigError::CapacityZero));
        s.capacity = 11;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::CapacityExceedsScheme { capacity: 11, .. })
        ));
        s.key_scheme = KeyScheme::Delimited;
        let opts = s.validate().expect("delimited holds 11");
        assert_eq!(opts.capacity.get(), 11);
        assert_eq!(opts.storage_path, PathBuf::from("/tmp/x.properties"));
    }

    #[test]
    /// What: Loading an explicit file works and the skeleton is only written once.
    fn load_and_ensure_settings_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.conf");
        assert!(ensure_settings_file(&path));
        assert!(!ensure_settings_file(&path));
        fs::write(&path, "capacity = 3\n").expect("write");
        assert_eq!(load_settings(Some(&path)).capacity, 3);
        let missing = dir.path().join("missing.conf");
        assert_eq!(load_settings(Some(&missing)), Settings::default());
    }
}
