//! Shared fixtures for unit tests.

use crate::section::{Document, Section};
use std::sync::Arc;

/// `X` holding `Intro`, which holds `Origins`.
pub fn intro_document() -> Document {
    Document::new(
        "X",
        vec![Section::new("Intro")
            .with_summary("Where it starts")
            .with_children(vec![Section::new("Origins").with_text("Long ago")])],
    )
}

/// Two parts that both contain `Background > Summary`.
pub fn colliding_document() -> Document {
    let part = |name: &str, detail: &str| {
        Section::new(name).with_children(vec![
            Section::new("Background")
                .with_children(vec![Section::new("Summary").with_children(vec![Section::new(detail)])]),
            Section::new(format!("{name} Notes")),
        ])
    };
    Document::new("Book", vec![part("Part One", "First"), part("Part Two", "Second")])
}

/// A flat essay list with categories and one external entry.
pub fn essay_document() -> Document {
    Document::new(
        "Essays",
        vec![
            Section::new("How to Start")
                .with_categories(["Starting Up"])
                .with_children(vec![Section::new("Ideas"), Section::new("Cofounders")]),
            Section::new("Default Alive").with_categories(["Money & Growth", "Starting Up"]),
            Section::new("Hackers and Painters")
                .with_categories(["Programming & Tech"])
                .with_url("https://example.com/hp.html"),
            Section::new("Untagged"),
        ],
    )
}

/// Follows headings from the document root, panicking if any is missing.
pub fn section_at(document: &Document, headings: &[&str]) -> Arc<Section> {
    let mut children = document.child_sections();
    let mut found = None;
    for heading in headings {
        let next = children
            .iter()
            .find(|s| s.label() == *heading)
            .cloned()
            .unwrap_or_else(|| panic!("no section {heading}"));
        children = next.child_sections();
        found = Some(next);
    }
    found.expect("empty heading path")
}

/// Labels of a section list.
pub fn labels(sections: &[Arc<Section>]) -> Vec<String> {
    sections.iter().map(|s| s.label()).collect()
}
