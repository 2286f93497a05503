use super::{Child, Document, Section};
use pretty_assertions::assert_eq;

#[test]
fn test_child_sections_skips_text_and_flattens_groups() {
    let section = Section::new("Part One")
        .with_text("Opening remarks")
        .with_children(vec![Section::new("A"), Section::new("B")])
        .with_text("Interlude")
        .with_children(vec![Section::new("C")]);

    let labels: Vec<String> = section.child_sections().iter().map(|s| s.label()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
    assert!(!section.is_leaf());
}

#[test]
fn test_text_only_section_is_leaf() {
    let section = Section::new("Notes").with_text("Just prose");
    assert!(section.is_leaf());
    assert!(section.child_sections().is_empty());
}

#[test]
fn test_empty_group_does_not_make_a_branch() {
    let section = Section::new("Hollow").with_children(vec![]);
    assert!(section.is_leaf());
}

#[test]
fn test_empty_url_is_not_external() {
    let mut section = Section::new("Essay");
    section.url = Some(String::new());
    assert!(!section.is_external());

    let section = section.with_url("https://example.com/essay.html");
    assert_eq!(section.external_url(), Some("https://example.com/essay.html"));
}

#[test]
fn test_deserialises_mixed_children_shape() {
    let json = r#"{
        "title": ["The", "Book"],
        "summary": ["A book"],
        "longSummary": [],
        "children": [
            {
                "heading": ["Chapter **1**"],
                "summary": ["Start"],
                "longSummary": ["Long start"],
                "children": [
                    "Some leaf text",
                    [
                        {"heading": ["Origins"], "summary": [], "longSummary": [], "children": []}
                    ]
                ],
                "categories": ["History"]
            }
        ]
    }"#;

    let doc: Document = serde_json::from_str(json).unwrap();
    assert_eq!(doc.label(), "The Book");

    let chapter = &doc.child_sections()[0];
    assert_eq!(chapter.label(), "Chapter 1");
    assert!(chapter.has_category("History"));
    assert_eq!(chapter.body_text().collect::<Vec<_>>(), vec!["Some leaf text"]);
    assert!(matches!(chapter.children[1], Child::Group(ref g) if g.len() == 1));
    assert_eq!(chapter.child_sections()[0].label(), "Origins");
}

#[test]
fn test_details_prefer_long_summary_over_body_text() {
    let mut section = Section::new("Origins").with_text("Raw paragraph");
    assert_eq!(section.details(), vec!["Raw paragraph"]);

    section.long_summary = vec!["Curated one".to_string(), "Curated two".to_string()];
    assert_eq!(section.details(), vec!["Curated one", "Curated two"]);
}
