use super::{available_categories, empty_state, project, EmptyState};
use crate::test_support::{essay_document, labels};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_no_category_returns_children_unchanged() {
    let children = essay_document().child_sections();
    let visible = project(&children, None);
    assert_eq!(visible.len(), children.len());
    assert!(visible.iter().zip(&children).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn test_category_keeps_only_tagged_children_in_order() {
    let children = essay_document().child_sections();
    let visible = project(&children, Some("Starting Up"));
    assert_eq!(labels(&visible), vec!["How to Start", "Default Alive"]);
}

#[test]
fn test_applying_then_clearing_restores_the_list() {
    let children = essay_document().child_sections();
    let before = project(&children, None);
    let filtered = project(&children, Some("Programming & Tech"));
    assert_eq!(labels(&filtered), vec!["Hackers and Painters"]);
    let after = project(&children, None);

    assert_eq!(before.len(), after.len());
    assert!(before.iter().zip(&after).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn test_available_categories_in_first_seen_order() {
    let children = essay_document().child_sections();
    assert_eq!(
        available_categories(&children),
        vec!["Starting Up", "Money & Growth", "Programming & Tech"]
    );
}

#[test]
fn test_empty_leaf_differs_from_filtered_out() {
    let children = essay_document().child_sections();
    let visible = project(&children, Some("Life & Career"));

    assert_eq!(
        empty_state(2, &children, &visible, Some("Life & Career")),
        Some(EmptyState::FilteredOut {
            category: "Life & Career".to_string()
        })
    );
    assert_eq!(empty_state(3, &[], &[], None), Some(EmptyState::NoSubsections));
    assert_eq!(empty_state(3, &[], &[], Some("Big Ideas")), Some(EmptyState::NoSubsections));
    assert_eq!(empty_state(2, &[], &[], None), Some(EmptyState::NoSections));
    assert_eq!(empty_state(2, &children, &children, None), None);
}

#[test]
fn test_messages_are_distinct() {
    let filtered = EmptyState::FilteredOut {
        category: "Big Ideas".to_string(),
    };
    assert_ne!(EmptyState::NoSubsections.message(), filtered.message());
    assert_eq!(EmptyState::NoSubsections.message(), "This section has no subsections.");
}
