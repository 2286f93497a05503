use super::Config;
use pretty_assertions::assert_eq;

#[test]
fn test_empty_config_uses_defaults() {
    let cfg = Config::parse("").unwrap();
    assert_eq!(cfg.library_dir, "library");
    assert_eq!(cfg.default_title, "essays");
    assert_eq!(cfg.flat_titles, vec!["essays"]);
    assert_eq!(cfg.wrap_width, 100);
    assert!(!cfg.compact);
}

#[test]
fn test_partial_config_overrides_some_fields() {
    let cfg = Config::parse("library_dir = \"books\"\ncompact = true\n").unwrap();
    assert_eq!(cfg.library_dir, "books");
    assert!(cfg.compact);
    assert_eq!(cfg.bookmarks_file, "bookmarks.json");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("quire.toml")).unwrap();
    assert_eq!(cfg.log_file, "quire.log");
}

#[test]
fn test_invalid_config_is_an_error() {
    assert!(Config::parse("wrap_width = \"wide\"").is_err());
}
