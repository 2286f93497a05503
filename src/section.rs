//! Section representation for tree-shaped documents.
//!
//! A document is a root holding top-level sections, and each section may hold further
//! sections. Children come in two shapes: raw leaf text, and nested collections of sections.
//! Only the nested collections are navigable, and [`Section::child_sections`] is the one
//! place that decides what counts as a navigable child.

use crate::text::join_fragments;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
/// One entry of a section's `children` list.
pub enum Child {
    /// Raw leaf text attached to the section body. Never navigable.
    Text(String),
    /// A nested collection of subsections.
    Group(Vec<Arc<Section>>),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A node in the content tree.
pub struct Section {
    /// Heading fragments; the label and, slugified, the identifier among siblings.
    pub heading: Vec<String>,
    /// Short summary fragments.
    #[serde(default)]
    pub summary: Vec<String>,
    /// Long summary paragraphs, shown when a section is expanded.
    #[serde(default)]
    pub long_summary: Vec<String>,
    /// Body text and nested subsection collections, in document order.
    #[serde(default)]
    pub children: Vec<Child>,
    /// External link; a section carrying one opens it instead of being descended into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tags used by the category filter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Illustration shown beside the heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Section {
    #[must_use]
    /// Creates a section with a single heading fragment and no content.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: vec![heading.into()],
            ..Self::default()
        }
    }

    #[must_use]
    /// Appends a nested collection holding `sections`.
    pub fn with_children(mut self, sections: Vec<Section>) -> Self {
        self.children
            .push(Child::Group(sections.into_iter().map(Arc::new).collect()));
        self
    }

    #[must_use]
    /// Appends a raw text child.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    #[must_use]
    /// Sets the short summary to a single fragment.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = vec![summary.into()];
        self
    }

    #[must_use]
    /// Marks the section as terminal-external.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    /// Tags the section with categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Navigable children: every nested collection, flattened one level, in order.
    ///
    /// Raw text children are discarded.
    #[must_use]
    pub fn child_sections(&self) -> Vec<Arc<Section>> {
        self.children
            .iter()
            .filter_map(|child| match child {
                Child::Group(sections) => Some(sections.iter().cloned()),
                Child::Text(_) => None,
            })
            .flatten()
            .collect()
    }

    #[must_use]
    /// True when no further descent is possible.
    pub fn is_leaf(&self) -> bool {
        !self
            .children
            .iter()
            .any(|child| matches!(child, Child::Group(sections) if !sections.is_empty()))
    }

    #[must_use]
    /// True when selecting the section opens an outside resource.
    pub fn is_external(&self) -> bool {
        self.external_url().is_some()
    }

    #[must_use]
    /// The external link, if set and non-empty.
    pub fn external_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    #[must_use]
    /// Display label: heading fragments joined and cleaned of markdown.
    pub fn label(&self) -> String {
        join_fragments(&self.heading)
    }

    /// Raw text children, in order.
    pub fn body_text(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|child| match child {
            Child::Text(text) => Some(text.as_str()),
            Child::Group(_) => None,
        })
    }

    #[must_use]
    /// Paragraphs shown when the section is expanded: the long summary, or the raw body
    /// text when there is none.
    pub fn details(&self) -> Vec<&str> {
        if self.long_summary.is_empty() {
            self.body_text().collect()
        } else {
            self.long_summary.iter().map(String::as_str).collect()
        }
    }

    #[must_use]
    /// Whether the section carries `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
/// The tree root. Always navigable and never external.
pub struct Document {
    /// Title fragments.
    pub title: Vec<String>,
    /// Short summary fragments.
    #[serde(default)]
    pub summary: Vec<String>,
    /// Long summary paragraphs.
    #[serde(default)]
    pub long_summary: Vec<String>,
    /// Top-level sections.
    #[serde(default)]
    pub children: Vec<Arc<Section>>,
}

impl Document {
    #[must_use]
    /// Creates a document with a single title fragment.
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: vec![title.into()],
            children: sections.into_iter().map(Arc::new).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    /// Top-level sections, in order.
    pub fn child_sections(&self) -> Vec<Arc<Section>> {
        self.children.clone()
    }

    #[must_use]
    /// Display label for the document breadcrumb.
    pub fn label(&self) -> String {
        join_fragments(&self.title)
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
