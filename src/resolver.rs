//! Walks a document along a decoded slug path to produce a breadcrumb trail.
//!
//! Matching is scoped to the children of the node reached so far, so two sections with
//! the same heading under different parents never shadow each other. The walk is greedy
//! and stops at the first slug that matches nothing: a stale or hand-edited path lands on
//! its deepest valid ancestor instead of failing. Sections with an external link, or whose
//! heading has no slug, are never part of a trail, so they never match.

use crate::path_codec::{decode, slugify};
use crate::section::{Document, Section};
use std::sync::Arc;

/// Number of fixed entries (`home`, `document`) at the head of every trail.
pub const ROOT_DEPTH: usize = 2;

#[derive(Clone, Debug)]
/// One entry of the navigation trail.
pub struct BreadcrumbItem {
    /// Slug of the section, or `home` / `document` for the fixed root entries.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// The section this entry stands for; absent for the root entries.
    pub section: Option<Arc<Section>>,
}

impl BreadcrumbItem {
    #[must_use]
    /// Creates an entry.
    pub fn new(id: impl Into<String>, label: impl Into<String>, section: Option<Arc<Section>>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            section,
        }
    }

    #[must_use]
    /// The application home entry.
    pub fn home() -> Self {
        Self::new("home", "Home", None)
    }

    #[must_use]
    /// The document root entry.
    pub fn document(label: impl Into<String>) -> Self {
        Self::new("document", label, None)
    }

    #[must_use]
    /// Entry for a section reached by navigation.
    pub fn for_section(section: &Arc<Section>) -> Self {
        Self::new(
            slugify(&section.heading),
            section.label(),
            Some(Arc::clone(section)),
        )
    }
}

impl PartialEq for BreadcrumbItem {
    fn eq(&self, other: &Self) -> bool {
        let same_section = match (&self.section, &other.section) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.id == other.id && self.label == other.label && same_section
    }
}

#[derive(Clone, Debug)]
/// Outcome of walking a document along a slug path.
pub struct Resolution {
    /// Root entries followed by one entry per matched slug.
    pub trail: Vec<BreadcrumbItem>,
    /// Navigable children of the deepest matched node.
    pub children: Vec<Arc<Section>>,
    /// Number of slugs that were requested.
    pub requested: usize,
    /// Number of slugs that matched before the walk stopped.
    pub matched: usize,
}

impl Resolution {
    #[must_use]
    /// True when some slugs were dropped because they matched nothing.
    pub fn is_truncated(&self) -> bool {
        self.matched < self.requested
    }
}

#[must_use]
/// Whether `section` can appear in a section path: it has a non-empty slug and no
/// external link.
pub fn is_addressable(section: &Section) -> bool {
    !section.is_external() && !slugify(&section.heading).is_empty()
}

#[must_use]
/// The fixed `[home, document]` head of every trail.
pub fn root_trail(document: &Document) -> Vec<BreadcrumbItem> {
    vec![BreadcrumbItem::home(), BreadcrumbItem::document(document.label())]
}

/// Resolves an encoded `section` parameter against `document`.
#[must_use]
pub fn resolve(document: &Document, path: &str) -> Resolution {
    resolve_path(document, &decode(path))
}

/// Resolves a slug list against `document`, left to right without backtracking.
#[must_use]
pub fn resolve_path<S: AsRef<str>>(document: &Document, slugs: &[S]) -> Resolution {
    let mut trail = root_trail(document);
    let mut children = document.child_sections();
    let mut matched = 0;

    for slug in slugs {
        let slug = slug.as_ref();
        let Some(found) = children
            .iter()
            .find(|child| is_addressable(child) && slugify(&child.heading) == slug)
            .cloned()
        else {
            tracing::debug!(slug, depth = matched, "path segment did not match; truncating");
            break;
        };
        trail.push(BreadcrumbItem::new(slug, found.label(), Some(Arc::clone(&found))));
        children = found.child_sections();
        matched += 1;
    }

    Resolution {
        trail,
        children,
        requested: slugs.len(),
        matched,
    }
}

#[cfg(test)]
#[path = "tests/resolver.rs"]
mod tests;
