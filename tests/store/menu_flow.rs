//! Integration tests for the presenter/store message flow.

#![cfg(test)]

use recentfiles::menu::{IconMap, MenuPresenter, Selection};
use recentfiles::{OpenOptions, RecentFiles};

#[test]
/// What: A handler rejecting a pick causes removal, persistence and a shorter re-render.
///
/// Inputs:
/// - Three entries; a handler that refuses paths ending in `.bak`.
///
/// Output:
/// - The rejected entry disappears from the store, from the file and from the next render.
fn rejected_pick_is_removed_and_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recent.properties");
    let mut store = RecentFiles::open(OpenOptions::new(&path)).expect("open");
    for p in ["/w/a.txt", "/w/b.bak", "/w/c.txt"] {
        store.touch(p, None).expect("touch");
    }

    let mut icons = IconMap::new();
    icons.extend_from_spec(".txt:text, :file");
    let mut presenter = MenuPresenter::new(icons, |p: &str, _: Option<&[String]>| {
        !p.ends_with(".bak")
    });

    let items = presenter.items(&store.snapshot());
    assert_eq!(items.len(), 3);
    assert_eq!(items[1].label, "b.bak");
    assert_eq!(items[1].icon.as_deref(), Some("file"));

    let selection = presenter.select(&store.snapshot(), 1);
    assert_eq!(
        selection,
        Selection::Rejected {
            path: "/w/b.bak".into()
        }
    );
    store.apply(&selection).expect("apply");

    let items = presenter.items(&store.snapshot());
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["c.txt", "a.txt"]);
    assert!(items.iter().all(|i| i.icon.as_deref() == Some("text")));

    let reopened = RecentFiles::open(OpenOptions::new(&path)).expect("reopen");
    assert_eq!(reopened.len(), 2);
}

#[test]
/// What: An accepted pick does not reorder the list.
///
/// Details:
/// - Promotion happens only when the caller touches the file after handling it.
fn accepted_pick_leaves_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recent.properties");
    let mut store = RecentFiles::open(OpenOptions::new(&path)).expect("open");
    store.touch("/w/a", None).expect("a");
    store.touch("/w/b", None).expect("b");
    let mut presenter = MenuPresenter::new(IconMap::new(), |_: &str, _: Option<&[String]>| true);
    let selection = presenter.select(&store.snapshot(), 1);
    assert_eq!(store.apply(&selection).expect("apply"), None);
    let order: Vec<String> = store.snapshot().into_iter().map(|e| e.path).collect();
    assert_eq!(order, vec!["/w/b", "/w/a"]);
}
