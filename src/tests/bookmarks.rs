use super::{Bookmark, BookmarkStore};
use crate::location::Location;
use crate::section::Section;
use pretty_assertions::assert_eq;
use std::fs;

fn origins_bookmark() -> Bookmark {
    let section = Section::new("Origins").with_summary("Where *it* began");
    Bookmark::new(&section, &Location::new("X").with_section("intro/origins"))
}

#[test]
fn test_bookmark_records_slug_and_location() {
    let bookmark = origins_bookmark();
    assert_eq!(bookmark.id, "origins");
    assert_eq!(bookmark.summary, "Where it began");
    assert_eq!(bookmark.location(), Location::new("X").with_section("intro/origins"));
}

#[test]
fn test_toggle_adds_then_removes() {
    let mut store = BookmarkStore::in_memory();
    assert!(store.toggle(origins_bookmark()));
    assert!(store.contains(&origins_bookmark()));
    assert!(!store.toggle(origins_bookmark()));
    assert!(store.is_empty());
}

#[test]
fn test_persists_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.json");

    let mut store = BookmarkStore::load(&path).unwrap();
    assert!(store.is_empty(), "missing file loads empty");
    store.toggle(origins_bookmark());
    store.save().unwrap();

    let reloaded = BookmarkStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get(0), Some(&origins_bookmark()));
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.json");
    fs::write(&path, "[oops").unwrap();
    assert!(BookmarkStore::load(&path).is_err());
}

#[test]
fn test_in_memory_store_saves_nowhere() {
    let mut store = BookmarkStore::in_memory();
    store.toggle(origins_bookmark());
    store.save().unwrap();
    assert!(store.path().is_none());
}

#[test]
fn test_same_slug_elsewhere_is_a_different_bookmark() {
    let intro = Section::new("Intro");
    let in_x = Bookmark::new(&intro, &Location::new("X").with_section("intro"));
    let in_y = Bookmark::new(&intro, &Location::new("Y").with_section("intro"));
    let nested = Bookmark::new(&intro, &Location::new("X").with_section("part-two/intro"));

    let mut store = BookmarkStore::in_memory();
    assert!(store.toggle(in_x.clone()));
    assert!(!store.contains(&in_y));
    assert!(!store.contains(&nested));

    assert!(store.toggle(in_y.clone()));
    assert!(store.toggle(nested));
    assert_eq!(store.len(), 3);

    assert!(!store.toggle(in_y));
    assert_eq!(store.len(), 2);
    assert!(store.contains(&in_x));
}
