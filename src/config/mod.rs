//! Configuration: `settings.conf` parsing and config directory layout.

/// Settings line helpers.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings model and loading.
mod settings;

pub use paths::{
    SETTINGS_FILE, STORAGE_FILE, config_dir, default_settings_path, default_storage_path,
    lists_dir, logs_dir,
};
pub use settings::{
    SETTINGS_SKELETON_CONTENT, Settings, ensure_settings_file, load_settings, parse_settings,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize tests that mutate `HOME`.
///
/// Details:
/// - Callers should lock the mutex to guard environment-variable or disk state changes.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
