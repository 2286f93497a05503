//! Category filtering of the current children, kept apart from navigation.
//!
//! The active category is ephemeral view state: it never reaches the trail or the location.

use crate::resolver::ROOT_DEPTH;
use crate::section::Section;
use std::sync::Arc;

/// Children visible under `category`; all of them when no category is active.
#[must_use]
pub fn project(children: &[Arc<Section>], category: Option<&str>) -> Vec<Arc<Section>> {
    match category {
        None => children.to_vec(),
        Some(category) => children
            .iter()
            .filter(|section| section.has_category(category))
            .cloned()
            .collect(),
    }
}

/// Distinct categories of `children`, in order of first appearance.
#[must_use]
pub fn available_categories(children: &[Arc<Section>]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in children.iter().flat_map(|section| &section.categories) {
        if !seen.contains(category) {
            seen.push(category.clone());
        }
    }
    seen
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Why nothing is listed. Each case is a normal state with its own message.
pub enum EmptyState {
    /// The document has no sections at all.
    NoSections,
    /// The current section is a leaf.
    NoSubsections,
    /// Children exist but none carry the active category.
    FilteredOut {
        /// The active category.
        category: String,
    },
}

impl EmptyState {
    #[must_use]
    /// User-facing explanation.
    pub fn message(&self) -> String {
        match self {
            Self::NoSections => "This document has no sections.".to_string(),
            Self::NoSubsections => "This section has no subsections.".to_string(),
            Self::FilteredOut { category } => format!("Nothing here is tagged \"{category}\"."),
        }
    }
}

/// Classifies an empty listing; `None` when `visible` has entries.
#[must_use]
pub fn empty_state(
    trail_depth: usize,
    children: &[Arc<Section>],
    visible: &[Arc<Section>],
    category: Option<&str>,
) -> Option<EmptyState> {
    if !visible.is_empty() {
        return None;
    }
    match category {
        Some(category) if !children.is_empty() => Some(EmptyState::FilteredOut {
            category: category.to_string(),
        }),
        _ if trail_depth > ROOT_DEPTH => Some(EmptyState::NoSubsections),
        _ => Some(EmptyState::NoSections),
    }
}

#[cfg(test)]
#[path = "tests/filter.rs"]
mod tests;
