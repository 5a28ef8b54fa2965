//! Presentation boundary for the recent list.
//!
//! The presenter turns a snapshot into menu items and forwards a pick to a
//! [`SelectionHandler`]. It never mutates the list: a rejected pick comes back as
//! [`Selection::Rejected`], which `RecentFiles::apply` turns into a removal and a save.

use std::path::Path;

use serde::Serialize;

use crate::recent::Entry;

/// What: Ordered suffix-to-icon table.
///
/// Details:
/// - First matching suffix wins; an empty suffix matches every file and works as a default.
/// - Icons are opaque names; the core never interprets them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconMap {
    /// `(suffix, icon)` pairs in lookup order.
    rules: Vec<(String, String)>,
}

impl IconMap {
    /// What: Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Append a rule; earlier rules take precedence.
    pub fn push(&mut self, suffix: impl Into<String>, icon: impl Into<String>) {
        self.rules.push((suffix.into(), icon.into()));
    }

    /// What: Parse a comma-separated `suffix:icon` list and append its rules.
    ///
    /// Inputs:
    /// - `spec`: e.g. `".rs:rust, .md:markdown, :file"`.
    ///
    /// Output:
    /// - Number of rules added; items without `:` or without an icon are skipped.
    pub fn extend_from_spec(&mut self, spec: &str) -> usize {
        let mut added = 0;
        for item in spec.split(',') {
            let Some((suffix, icon)) = item.trim().rsplit_once(':') else {
                continue;
            };
            let icon = icon.trim();
            if icon.is_empty() {
                continue;
            }
            self.push(suffix.trim(), icon);
            added += 1;
        }
        added
    }

    /// What: Find the icon for a file name.
    #[must_use]
    pub fn icon_for(&self, entry: &Entry) -> Option<&str> {
        self.rules
            .iter()
            .find(|(suffix, _)| entry.extension_matches(suffix))
            .map(|(_, icon)| icon.as_str())
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// What: One renderable row of the recent-files menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Display label (file name).
    pub label: String,
    /// Full stored path.
    pub path: String,
    /// Attributes recorded for the entry.
    pub attributes: Option<Vec<String>>,
    /// Icon name from the [`IconMap`], if any rule matched.
    pub icon: Option<String>,
}

/// What: Callback invoked when the user picks a recent file.
pub trait SelectionHandler {
    /// What: Handle a picked entry.
    ///
    /// Output:
    /// - `true` when the file was handled; `false` drops the entry from the list.
    fn on_select(&mut self, path: &str, attributes: Option<&[String]>) -> bool;
}

impl<F> SelectionHandler for F
where
    F: FnMut(&str, Option<&[String]>) -> bool,
{
    fn on_select(&mut self, path: &str, attributes: Option<&[String]>) -> bool {
        self(path, attributes)
    }
}

/// What: Default handler that accepts entries whose file still exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExistingFileHandler;

impl SelectionHandler for ExistingFileHandler {
    fn on_select(&mut self, path: &str, _attributes: Option<&[String]>) -> bool {
        Path::new(path).is_file()
    }
}

/// What: Message produced by a menu pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The handler accepted the entry.
    Accepted {
        /// Picked path.
        path: String,
    },
    /// The handler rejected the entry; it should be removed.
    Rejected {
        /// Picked path.
        path: String,
    },
    /// No entry at the picked index.
    OutOfRange {
        /// Requested index.
        index: usize,
    },
}

/// What: Builds menu items and dispatches picks to a handler.
pub struct MenuPresenter<H> {
    /// Suffix-to-icon lookup.
    icons: IconMap,
    /// Caller-supplied pick handler.
    handler: H,
}

impl<H: SelectionHandler> MenuPresenter<H> {
    /// What: Create a presenter.
    pub const fn new(icons: IconMap, handler: H) -> Self {
        Self { icons, handler }
    }

    /// What: Render a snapshot (most recent first) into menu items.
    #[must_use]
    pub fn items(&self, snapshot: &[Entry]) -> Vec<MenuItem> {
        snapshot
            .iter()
            .map(|entry| MenuItem {
                label: entry.file_name().to_string(),
                path: entry.path.clone(),
                attributes: entry.attributes.clone(),
                icon: self.icons.icon_for(entry).map(str::to_string),
            })
            .collect()
    }

    /// What: Dispatch a pick at `index` of `snapshot` to the handler.
    ///
    /// Output:
    /// - [`Selection`] describing the result; the caller applies it to the store.
    pub fn select(&mut self, snapshot: &[Entry], index: usize) -> Selection {
        let Some(entry) = snapshot.get(index) else {
            return Selection::OutOfRange { index };
        };
        let path = entry.path.clone();
        if self.handler.on_select(&entry.path, entry.attributes.as_deref()) {
            tracing::debug!(path = %path, "[Menu] Selection handled");
            Selection::Accepted { path }
        } else {
            tracing::info!(path = %path, "[Menu] Selection rejected by handler");
            Selection::Rejected { path }
        }
    }

    /// Icon table in use.
    pub const fn icons(&self) -> &IconMap {
        &self.icons
    }
}
