use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the user's config base.
const APP_DIR: &str = "recentfiles";
/// Settings file name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.conf";
/// Default storage file name inside the lists directory.
pub const STORAGE_FILE: &str = "recent_files.properties";

/// What: Candidate config directories in lookup order.
///
/// Output:
/// - `$HOME/.config/recentfiles`, then `$XDG_CONFIG_HOME/recentfiles`; unset or blank
///   variables are skipped.
fn candidate_dirs() -> Vec<PathBuf> {
    let from_env = |var: &str| {
        env::var_os(var)
            .filter(|v| !v.to_string_lossy().trim().is_empty())
            .map(PathBuf::from)
    };
    [
        from_env("HOME").map(|h| h.join(".config")),
        from_env("XDG_CONFIG_HOME"),
    ]
    .into_iter()
    .flatten()
    .map(|base| base.join(APP_DIR))
    .collect()
}

/// Determine the settings file path: the first candidate directory holding `settings.conf`.
pub(crate) fn resolve_settings_config_path() -> Option<PathBuf> {
    candidate_dirs()
        .into_iter()
        .map(|dir| dir.join(SETTINGS_FILE))
        .find(|p| p.is_file())
}

/// What: Config directory, created on first use.
///
/// Output:
/// - The first candidate directory that exists or can be created; `./.config/recentfiles`
///   when neither `HOME` nor `XDG_CONFIG_HOME` is usable.
pub fn config_dir() -> PathBuf {
    let candidates = candidate_dirs();
    if let Some(dir) = candidates
        .iter()
        .find(|dir| std::fs::create_dir_all(dir).is_ok())
    {
        return dir.clone();
    }
    let fallback = candidates
        .into_iter()
        .next()
        .unwrap_or_else(|| Path::new(".config").join(APP_DIR));
    let _ = std::fs::create_dir_all(&fallback);
    fallback
}

/// Logs directory under config: "$HOME/.config/recentfiles/logs" (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Lists directory under config: "$HOME/.config/recentfiles/lists" (ensured to exist)
pub fn lists_dir() -> PathBuf {
    let dir = config_dir().join("lists");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Storage file used when settings and CLI name none.
pub fn default_storage_path() -> PathBuf {
    lists_dir().join(STORAGE_FILE)
}

/// Settings file location used when none exists yet.
pub fn default_settings_path() -> PathBuf {
    config_dir().join(SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    #[test]
    /// What: Config, lists and logs directories resolve under a shimmed `HOME`.
    fn paths_config_lists_logs_under_home() {
        let _guard = crate::config::test_mutex()
            .lock()
            .expect("Test mutex poisoned");
        let orig_home = std::env::var_os("HOME");
        let orig_xdg = std::env::var_os("XDG_CONFIG_HOME");
        let base = tempfile::tempdir().expect("tempdir");
        let xdg = tempfile::tempdir().expect("xdg tempdir");
        unsafe {
            std::env::set_var("HOME", base.path().display().to_string());
            std::env::set_var("XDG_CONFIG_HOME", xdg.path().display().to_string());
        }
        let cfg = super::config_dir();
        let logs = super::logs_dir();
        let storage = super::default_storage_path();
        assert!(cfg.ends_with("recentfiles"));
        assert!(cfg.starts_with(base.path()));
        assert!(logs.ends_with("logs"));
        assert!(logs.is_dir());
        assert!(storage.ends_with("lists/recent_files.properties"));
        assert!(super::resolve_settings_config_path().is_none());

        let xdg_settings = xdg.path().join("recentfiles").join(super::SETTINGS_FILE);
        std::fs::create_dir_all(xdg_settings.parent().expect("xdg dir")).expect("mkdir xdg");
        std::fs::write(&xdg_settings, "capacity = 2\n").expect("write xdg settings");
        assert_eq!(super::resolve_settings_config_path(), Some(xdg_settings));

        std::fs::write(super::default_settings_path(), "capacity = 4\n").expect("write settings");
        assert_eq!(
            super::resolve_settings_config_path(),
            Some(cfg.join(super::SETTINGS_FILE))
        );
        unsafe {
            for (var, orig) in [("HOME", orig_home), ("XDG_CONFIG_HOME", orig_xdg)] {
                if let Some(v) = orig {
                    std::env::set_var(var, v);
                } else {
                    std::env::remove_var(var);
                }
            }
        }
    }
}
