//! Integration tests for storage round-trips across process restarts.
//!
//! Tests cover:
//! - Files written in the legacy `java.util.Properties` layout
//! - Order and attribute survival across reopen
//! - Capacity bound under long touch sequences

#![cfg(test)]

use std::num::NonZeroUsize;

use recentfiles::codec::KeyScheme;
use recentfiles::{Entry, OpenOptions, RecentFiles};

fn cap(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("test capacity must be non-zero")
}

#[test]
/// What: Load a storage file in the legacy layout.
///
/// Inputs:
/// - Date header comment, escaped Windows path with colon, attributes on the first entry.
///
/// Output:
/// - Entries in index order with unescaped paths and attributes.
///
/// Details:
/// - Key order in the file is arbitrary (hash order in older writers); decoding must not care.
fn loads_original_properties_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recent.cfg");
    std::fs::write(
        &path,
        "#Mon Mar 03 10:15:00 IST 2014\n\
         10=C\\:\\\\Users\\\\deepak\\\\todo.txt\n\
         02=bold\n\
         00=/home/deepak/story.txt\n\
         01=12\n",
    )
    .expect("write");

    let store = RecentFiles::open(OpenOptions::new(&path).capacity(cap(5))).expect("open");
    assert_eq!(
        store.snapshot(),
        vec![
            Entry::new(
                "/home/deepak/story.txt",
                Some(vec!["12".to_string(), "bold".to_string()])
            ),
            Entry::new(r"C:\Users\deepak\todo.txt", None),
        ]
    );
}

#[test]
/// What: Entries loaded verbatim stay addressable even when not absolute on this platform.
fn foreign_paths_remain_addressable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recent.cfg");
    std::fs::write(&path, "00=C\\:\\\\a.txt\n10=/b.txt\n").expect("write");
    let mut store = RecentFiles::open(OpenOptions::new(&path)).expect("open");
    store.touch(r"C:\a.txt", Some(vec!["x".into()])).expect("touch");
    assert_eq!(store.len(), 2);
    assert!(store.remove(r"C:\a.txt").expect("remove").is_some());
    assert_eq!(store.len(), 1);
}

#[test]
/// What: Bound and uniqueness hold across many touches and restarts.
///
/// Details:
/// - Reopens the store every 25 touches to exercise the codec between mutations.
fn long_sequence_respects_capacity_across_restarts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recent.properties");
    let options = OpenOptions::new(&path).capacity(cap(6));
    let mut store = RecentFiles::open(options.clone()).expect("open");
    for step in 0..200usize {
        let p = format!("/data/{}", (step * 7) % 11);
        store
            .touch(&p, Some(vec![step.to_string()]))
            .expect("touch");
        assert!(store.len() <= 6);
        if step % 25 == 24 {
            let before = store.snapshot();
            store = RecentFiles::open(options.clone()).expect("reopen");
            assert_eq!(store.snapshot(), before);
        }
    }
    let mut seen: Vec<String> = store.snapshot().into_iter().map(|e| e.path).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), store.len());
}

#[test]
/// What: A large delimited list round-trips beyond the legacy ceiling.
fn delimited_scheme_holds_large_lists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("recent.properties");
    let options = OpenOptions::new(&path)
        .capacity(cap(40))
        .key_scheme(KeyScheme::Delimited);
    let mut store = RecentFiles::open(options.clone()).expect("open");
    for i in 0..40 {
        let attrs: Vec<String> = (0..(i % 13)).map(|j| format!("a{j}")).collect();
        store.touch(format!("/big/{i}"), Some(attrs)).expect("touch");
    }
    let expected: Vec<Entry> = store
        .snapshot()
        .into_iter()
        .map(|mut e| {
            if e.attribute_values().is_empty() {
                e.attributes = None;
            }
            e
        })
        .collect();
    let reopened = RecentFiles::open(options).expect("reopen");
    assert_eq!(reopened.snapshot(), expected);
}
