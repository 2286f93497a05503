//! Conversion between section headings, slugs and the `section` location parameter.
//!
//! Slugs are recomputed from heading text on every use and never stored, so editing a
//! heading changes its slug and invalidates links that pointed at the old text.

use crate::resolver::{BreadcrumbItem, ROOT_DEPTH};

/// Derives the identifier of a section from its heading fragments.
///
/// Fragments are joined with a space and lowercased, and every character outside
/// `[a-z0-9-]` becomes `-`.
#[must_use]
pub fn slugify(heading: &[String]) -> String {
    heading
        .join(" ")
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Encodes the part of a trail below the fixed `[home, document]` pair.
#[must_use]
pub fn encode(trail: &[BreadcrumbItem]) -> String {
    trail
        .iter()
        .skip(ROOT_DEPTH)
        .map(|item| item.id.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Splits a path string into slugs. The empty string decodes to no slugs.
#[must_use]
pub fn decode(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').map(str::to_string).collect()
}

#[cfg(test)]
#[path = "tests/path_codec.rs"]
mod tests;
