//! Durable recent-files list: a `RecencyList` kept in sync with its storage file.
//!
//! Every mutation rewrites the whole file. Loading is fail-soft: a missing file is
//! created empty, an unreadable or damaged one yields whatever entries decode.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::codec::{self, KeyScheme, Properties};
use crate::error::RecentError;
use crate::menu::Selection;
use crate::recent::{Entry, RecencyList, Touch, default_capacity};


/// What: Options needed to open a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenOptions {
    /// Maximum number of retained entries.
    pub capacity: NonZeroUsize,
    /// Storage file; created if absent.
    pub storage_path: PathBuf,
    /// Key layout used when writing.
    pub key_scheme: KeyScheme,
}

impl OpenOptions {
    /// What: Options for `storage_path` with the default capacity and legacy key scheme.
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            capacity: default_capacity(),
            storage_path: storage_path.into(),
            key_scheme: KeyScheme::default(),
        }
    }

    /// Set the capacity.
    #[must_use]
    pub fn capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the key scheme used for writes.
    #[must_use]
    pub fn key_scheme(mut self, key_scheme: KeyScheme) -> Self {
        self.key_scheme = key_scheme;
        self
    }
}

/// What: Recent-files list bound to a storage file.
#[derive(Debug)]
pub struct RecentFiles {
    /// In-memory entries.
    list: RecencyList,
    /// File rewritten after every mutation.
    storage_path: PathBuf,
    /// Key layout for writes.
    key_scheme: KeyScheme,
    /// Unreadable `format` marker found on open; blocks writes until cleared or migrated.
    unknown_format: Option<String>,
}

impl RecentFiles {
    /// What: Open (or create) the storage file and load its entries.
    ///
    /// Inputs:
    /// - `options`: Capacity, storage location and key scheme.
    ///
    /// Output:
    /// - Store pre-populated with the decoded entries, most recent first.
    ///
    /// # Errors
    /// - `RecentError::Config` when the key scheme cannot hold the capacity.
    /// - `RecentError::Persistence` when a missing storage file cannot be created, or a
    ///   legacy file cannot be rewritten in a newly configured scheme.
    ///
    /// Details:
    /// - Read failures and damaged content are logged and yield a partial or empty list.
    /// - If the file was written with a different key scheme than configured, it is
    ///   rewritten once in the configured scheme.
    /// - A file with an unknown `format` marker loads empty and is protected: `touch`,
    ///   `remove` and `save` fail with `RecentError::UnknownFormat` until `clear` or
    ///   `migrate` replaces it.
    pub fn open(options: OpenOptions) -> Result<Self, RecentError> {
        let OpenOptions {
            capacity,
            storage_path,
            key_scheme,
        } = options;
        key_scheme.check_capacity(capacity)?;
        ensure_storage_file(&storage_path)?;

        let content = read_storage(&storage_path);
        let props = Properties::parse(&content);
        let decoded = codec::decode(&props, capacity);
        let stored_scheme = decoded.scheme;
        let unknown_format = match stored_scheme {
            Some(_) => None,
            None => props.get(codec::FORMAT_KEY).map(str::to_string),
        };
        let list = RecencyList::from_entries(capacity, decoded.entries);
        tracing::info!(
            path = %storage_path.display(),
            entries = list.len(),
            capacity = capacity.get(),
            "[Store] Recent files loaded"
        );

        let mut store = Self {
            list,
            storage_path,
            key_scheme,
            unknown_format,
        };
        if let Some(marker) = &store.unknown_format {
            tracing::warn!(
                path = %store.storage_path.display(),
                format = %marker,
                "[Store] Storage file has an unknown format; writes are blocked"
            );
        }
        if let Some(stored) = stored_scheme
            && stored != key_scheme
            && !store.list.is_empty()
        {
            tracing::info!(
                path = %store.storage_path.display(),
                from = %stored,
                to = %key_scheme,
                "[Store] Migrating storage key scheme"
            );
            store.save()?;
        }
        Ok(store)
    }

    /// What: Record a use of `path` and persist the list.
    ///
    /// Inputs:
    /// - `path`: File that was used; relative paths are made absolute.
    /// - `attributes`: Replacement attribute sequence.
    ///
    /// Output:
    /// - `Ok(Some(touch))` describing the change; `Ok(None)` for an empty path, which is ignored.
    ///
    /// # Errors
    /// - `RecentError::UnknownFormat` if the storage file is protected; nothing changes.
    /// - `RecentError::Persistence` if the save fails. The in-memory change is kept.
    pub fn touch(
        &mut self,
        path: impl AsRef<Path>,
        attributes: Option<Vec<String>>,
    ) -> Result<Option<Touch>, RecentError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            tracing::debug!("[Store] Ignoring touch with empty path");
            return Ok(None);
        }
        self.ensure_writable()?;
        let key = self.resolve_key(path);
        let outcome = self.list.touch(key.clone(), attributes);
        match &outcome {
            Touch::Inserted => tracing::debug!(path = %key, "[Store] Added recent file"),
            Touch::Promoted(_) => tracing::debug!(path = %key, "[Store] Promoted recent file"),
            Touch::Evicted(old) => tracing::debug!(
                path = %key,
                evicted = %old.path,
                "[Store] Added recent file, evicted oldest"
            ),
        }
        self.save()?;
        Ok(Some(outcome))
    }

    /// What: Remove `path` and persist the list if it was present.
    ///
    /// Output:
    /// - The removed entry; `Ok(None)` leaves list and file untouched.
    ///
    /// # Errors
    /// - `RecentError::UnknownFormat` if the storage file is protected.
    /// - `RecentError::Persistence` if the save fails. The entry stays removed in memory.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Result<Option<Entry>, RecentError> {
        self.ensure_writable()?;
        let key = self.resolve_key(path.as_ref());
        let Some(removed) = self.list.remove(&key) else {
            return Ok(None);
        };
        tracing::debug!(path = %key, "[Store] Removed recent file");
        self.save()?;
        Ok(Some(removed))
    }

    /// What: Drop every entry and persist the empty list.
    ///
    /// Details:
    /// - Also replaces a storage file whose format could not be read.
    ///
    /// # Errors
    /// - `RecentError::Persistence` if the save fails.
    pub fn clear(&mut self) -> Result<(), RecentError> {
        self.list.clear();
        self.unknown_format = None;
        self.save()
    }

    /// What: Apply a menu selection message.
    ///
    /// Output:
    /// - The removed entry for `Selection::Rejected`; `None` otherwise.
    ///
    /// # Errors
    /// - `RecentError::Persistence` if removing a rejected entry cannot be saved.
    pub fn apply(&mut self, selection: &Selection) -> Result<Option<Entry>, RecentError> {
        match selection {
            Selection::Rejected { path } => self.remove(path),
            Selection::Accepted { .. } | Selection::OutOfRange { .. } => Ok(None),
        }
    }

    /// What: Switch the key scheme and rewrite the storage file.
    ///
    /// Details:
    /// - Also replaces a storage file whose format could not be read.
    ///
    /// # Errors
    /// - `RecentError::Config` when the scheme cannot hold the capacity.
    /// - `RecentError::Persistence` if the rewrite fails.
    pub fn migrate(&mut self, key_scheme: KeyScheme) -> Result<(), RecentError> {
        key_scheme.check_capacity(self.capacity())?;
        tracing::info!(
            path = %self.storage_path.display(),
            from = %self.key_scheme,
            to = %key_scheme,
            "[Store] Rewriting storage key scheme"
        );
        self.key_scheme = key_scheme;
        self.unknown_format = None;
        self.save()
    }

    /// What: Rewrite the storage file from the in-memory list.
    ///
    /// # Errors
    /// - `RecentError::UnknownFormat` if the storage file is protected.
    /// - `RecentError::Persistence` carrying the path and the I/O error.
    pub fn save(&self) -> Result<(), RecentError> {
        self.ensure_writable()?;
        let props = codec::encode(self.list.iter(), self.key_scheme);
        let header = chrono::Local::now()
            .format("%a %b %d %H:%M:%S %z %Y")
            .to_string();
        let content = props.render(Some(&header));
        tracing::trace!(
            path = %self.storage_path.display(),
            bytes = content.len(),
            "[Store] Writing recent files to disk"
        );
        match fs::write(&self.storage_path, &content) {
            Ok(()) => {
                tracing::debug!(
                    path = %self.storage_path.display(),
                    entries = self.list.len(),
                    "[Store] Recent files persisted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.storage_path.display(),
                    error = %e,
                    "[Store] Failed to write recent files"
                );
                Err(RecentError::persistence(&self.storage_path, e))
            }
        }
    }

    /// What: Current entries, most recent first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entry> {
        self.list.snapshot()
    }

    /// Read-only access to the in-memory list.
    #[must_use]
    pub const fn list(&self) -> &RecencyList {
        &self.list
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.list.capacity()
    }

    /// Storage file location.
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Key layout used for writes.
    #[must_use]
    pub const fn key_scheme(&self) -> KeyScheme {
        self.key_scheme
    }

    /// Whether writes are blocked by an unreadable storage format.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        self.unknown_format.is_some()
    }

    /// What: Fail with `RecentError::UnknownFormat` while the storage file is protected.
    fn ensure_writable(&self) -> Result<(), RecentError> {
        match &self.unknown_format {
            None => Ok(()),
            Some(marker) => Err(RecentError::UnknownFormat {
                path: self.storage_path.clone(),
                marker: marker.clone(),
            }),
        }
    }

    /// What: Map a caller path to the stored identity string.
    ///
    /// Details:
    /// - A path already stored verbatim is used as is, so entries loaded from files
    ///   written elsewhere stay addressable.
    /// - Otherwise the path is made absolute without touching the filesystem.
    fn resolve_key(&self, path: &Path) -> String {
        let raw = path.to_string_lossy();
        if self.list.contains(&raw) {
            return raw.into_owned();
        }
        std::path::absolute(path)
            .map_or_else(|_| raw.into_owned(), |abs| abs.to_string_lossy().into_owned())
    }
}

/// What: Create the storage file (and its directory) when missing.
///
/// # Errors
/// - `RecentError::Persistence` when the file cannot be created.
fn ensure_storage_file(path: &Path) -> Result<(), RecentError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|e| RecentError::persistence(path, e))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RecentError::persistence(path, e))?;
    tracing::info!(path = %path.display(), "[Store] Created empty storage file");
    Ok(())
}

/// What: Read the storage file, tolerating failures.
///
/// Output:
/// - File contents with invalid UTF-8 replaced; empty on read errors.
fn read_storage(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "[Store] Failed to read recent files; starting empty"
            );
            String::new()
        }
    }
}
