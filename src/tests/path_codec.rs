use super::{decode, encode, slugify};
use crate::resolver::BreadcrumbItem;
use pretty_assertions::assert_eq;

fn heading(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| (*p).to_string()).collect()
}

#[test]
fn test_slugify_lowercases_and_replaces() {
    assert_eq!(slugify(&heading(&["Intro"])), "intro");
    assert_eq!(slugify(&heading(&["How to", "Start"])), "how-to-start");
    assert_eq!(slugify(&heading(&["What's *new*?"])), "what-s--new--");
    assert_eq!(slugify(&heading(&["Part-2: 1999"])), "part-2--1999");
}

#[test]
fn test_slugify_replaces_each_non_ascii_char() {
    assert_eq!(slugify(&heading(&["Café"])), "caf-");
}

#[test]
fn test_slugify_is_deterministic() {
    let h = heading(&["The", "Same", "Heading"]);
    assert_eq!(slugify(&h), slugify(&h.clone()));
}

#[test]
fn test_decode_empty_is_empty() {
    assert!(decode("").is_empty());
}

#[test]
fn test_decode_splits_on_slash() {
    assert_eq!(decode("intro/origins"), vec!["intro", "origins"]);
    assert_eq!(decode("intro//x"), vec!["intro", "", "x"]);
}

#[test]
fn test_encode_skips_root_pair() {
    let trail = vec![
        BreadcrumbItem::home(),
        BreadcrumbItem::document("Book"),
        BreadcrumbItem::new("intro", "Intro", None),
        BreadcrumbItem::new("origins", "Origins", None),
    ];
    assert_eq!(encode(&trail), "intro/origins");
    assert_eq!(encode(&trail[..2]), "");
}

#[test]
fn test_decode_splits_on_every_slash() {
    assert_eq!(decode("a/b-c/d"), vec!["a", "b-c", "d"]);
}
