use super::{clean_markdown, join_fragments};

#[test]
fn test_emphasis_and_links_are_stripped() {
    assert_eq!(
        clean_markdown("The **Founder** and [the *company*](https://example.com)"),
        "The Founder and the company"
    );
}

#[test]
fn test_inline_code_keeps_its_text() {
    assert_eq!(clean_markdown("Use `cargo` daily"), "Use cargo daily");
}

#[test]
fn test_paragraphs_collapse_to_one_line() {
    assert_eq!(clean_markdown("First line\nsecond line\n\nThird"), "First line second line Third");
}

#[test]
fn test_join_fragments() {
    let fragments = vec!["How to".to_string(), "*Start*".to_string(), "a Startup".to_string()];
    assert_eq!(join_fragments(&fragments), "How to Start a Startup");
    assert_eq!(join_fragments(&[]), "");
}
