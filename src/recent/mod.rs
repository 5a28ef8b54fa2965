//! Bounded most-recently-used list of file entries.
//!
//! Backed by an `lru::LruCache` keyed by path, so deduplication, promotion and
//! eviction come from the cache itself. Iteration order is the public contract:
//! front (index 0) is the most recently touched entry.

use std::num::NonZeroUsize;

use lru::LruCache;

mod entry;

pub use entry::Entry;

/// Default number of retained entries.
pub const DEFAULT_CAPACITY: usize = 10;

/// What: Provide the non-zero default capacity.
///
/// Details:
/// - Uses a const unchecked constructor because the capacity constant is guaranteed
///   to be greater than zero.
#[must_use]
pub const fn default_capacity() -> NonZeroUsize {
    // SAFETY: `DEFAULT_CAPACITY` is a non-zero constant.
    unsafe { NonZeroUsize::new_unchecked(DEFAULT_CAPACITY) }
}

/// What: Result of a `touch`, describing how the list changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Touch {
    /// A new path was inserted at the front without evicting anything.
    Inserted,
    /// A known path moved to the front; holds the entry it replaced.
    Promoted(Entry),
    /// A new path was inserted at the front and the back entry was dropped.
    Evicted(Entry),
}

/// What: In-memory recency list with a fixed capacity.
///
/// Details:
/// - `len() <= capacity()` and unique paths hold after every operation.
/// - No I/O; persistence is driven by `crate::store::RecentFiles`.
pub struct RecencyList {
    /// Entries keyed by path, most recent first.
    entries: LruCache<String, Entry>,
}

impl RecencyList {
    /// What: Create an empty list holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// What: Build a list from a front-to-back sequence of entries.
    ///
    /// Inputs:
    /// - `capacity`: Maximum number of retained entries.
    /// - `entries`: Entries ordered most recent first (e.g. decoded from storage).
    ///
    /// Output:
    /// - A list whose order matches `entries`.
    ///
    /// Details:
    /// - Inserts from least recent to most recent, so a duplicated path keeps its
    ///   front-most position and attributes, and entries past `capacity` fall off the back.
    #[must_use]
    pub fn from_entries(capacity: NonZeroUsize, entries: Vec<Entry>) -> Self {
        let mut list = Self::new(capacity);
        for entry in entries.into_iter().rev() {
            list.entries.put(entry.path.clone(), entry);
        }
        list
    }

    /// What: Record a use of `path`, moving it to the front.
    ///
    /// Inputs:
    /// - `path`: Identity of the file.
    /// - `attributes`: Replacement attribute sequence; never merged with the old one.
    ///
    /// Output:
    /// - [`Touch`] describing whether the path was new, promoted, or caused an eviction.
    ///
    /// Details:
    /// - A new path on a full list evicts the back entry; size never exceeds capacity.
    pub fn touch(&mut self, path: impl Into<String>, attributes: Option<Vec<String>>) -> Touch {
        let entry = Entry::new(path, attributes);
        let key = entry.path.clone();
        if self.entries.contains(&key) {
            // `put` on a present key swaps the value and promotes it.
            return match self.entries.put(key, entry) {
                Some(previous) => Touch::Promoted(previous),
                None => Touch::Inserted,
            };
        }
        match self.entries.push(key, entry) {
            Some((_, evicted)) => Touch::Evicted(evicted),
            None => Touch::Inserted,
        }
    }

    /// What: Drop the entry for `path`, if present.
    ///
    /// Output:
    /// - The removed entry; `None` leaves order and size untouched.
    pub fn remove(&mut self, path: &str) -> Option<Entry> {
        self.entries.pop(path)
    }

    /// What: Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// What: Iterate entries from most to least recent without promoting them.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// What: Return the current entries, most recent first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Entry> {
        self.iter().cloned().collect()
    }

    /// What: Fetch an entry by position in most-recent-first order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.iter().nth(index)
    }

    /// What: Position of `path` in most-recent-first order.
    #[must_use]
    pub fn position(&self, path: &str) -> Option<usize> {
        self.iter().position(|entry| entry.path == path)
    }

    /// What: Whether an entry with `path` exists.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains(path)
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fixed maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.cap()
    }
}

impl std::fmt::Debug for RecencyList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecencyList")
            .field("capacity", &self.capacity())
            .field("entries", &self.snapshot())
            .finish()
    }
}
