//! Builds a section tree from the headings of a text document.
//!
//! Headings are located with the format's tree-sitter query. Each heading owns the text
//! up to the next heading, and nests under the nearest preceding heading of a lower
//! level. The paragraphs of that text become the section's summaries and leaf children.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::{Child, Document, Section};
use std::sync::Arc;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A heading found in a text document.
pub struct Heading {
    /// Nesting depth (1 for top-level).
    pub level: usize,
    /// Heading text without markup symbols.
    pub title: String,
    /// Byte offset where the heading starts.
    pub byte_start: usize,
    /// Byte offset where the heading ends and its body begins.
    pub byte_end: usize,
}

/// Locates every heading of `text`, in document order.
///
/// # Errors
///
/// Returns [`Error::Markdown`] if the grammar cannot be loaded, the query is invalid, or a
/// heading is not valid UTF-8.
pub fn extract_headings(text: &str, format: &dyn Format) -> Result<Vec<Heading>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| Error::Markdown(e.to_string()))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| Error::Markdown("parser produced no tree".to_string()))?;
    let query =
        Query::new(&language, format.section_query()).map_err(|e| Error::Markdown(e.to_string()))?;

    let bytes = text.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    let mut headings = Vec::new();

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let node = capture.node;
            let mut level = None;
            let mut title = String::new();
            for i in 0..node.child_count() {
                let Some(child) = node.child(i) else {
                    continue;
                };
                if let Some(found) = format.heading_level(child.kind()) {
                    level = Some(found);
                } else if child.kind() == format.title_kind() {
                    title = child
                        .utf8_text(bytes)
                        .map_err(|e| Error::Markdown(e.to_string()))?
                        .trim()
                        .to_string();
                }
            }
            if let Some(level) = level {
                headings.push(Heading {
                    level,
                    title,
                    byte_start: node.start_byte(),
                    byte_end: node.end_byte(),
                });
            }
        }
    }

    headings.sort_by_key(|h| h.byte_start);
    headings.dedup_by_key(|h| h.byte_start);
    Ok(headings)
}

/// Splits body text into paragraphs on blank lines, joining wrapped lines with a space.
fn paragraphs(body: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }
    out
}

struct Draft {
    heading: String,
    level: usize,
    paragraphs: Vec<String>,
    children: Vec<Draft>,
}

impl Draft {
    fn into_section(self) -> Section {
        let mut section = Section::new(self.heading);
        section.summary = self.paragraphs.first().cloned().into_iter().collect();
        section.long_summary.clone_from(&self.paragraphs);
        section.children = self.paragraphs.into_iter().map(Child::Text).collect();
        if !self.children.is_empty() {
            section.children.push(Child::Group(
                self.children
                    .into_iter()
                    .map(|draft| Arc::new(draft.into_section()))
                    .collect(),
            ));
        }
        section
    }
}

/// Pops every open draft at `level` or deeper, attaching each to its parent.
fn close_until(stack: &mut Vec<Draft>, roots: &mut Vec<Draft>, level: usize) {
    while stack.last().is_some_and(|top| top.level >= level) {
        let Some(done) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

/// Builds a document from a text file's heading outline.
///
/// A file whose headings all sit under one level-1 heading takes that heading as its
/// title; otherwise `fallback_title` is used and every outermost heading is top-level.
///
/// # Errors
///
/// Returns [`Error::Markdown`] if the headings cannot be extracted.
pub fn document_from_text(fallback_title: &str, text: &str, format: &dyn Format) -> Result<Document> {
    let headings = extract_headings(text, format)?;

    let preamble_end = headings.first().map_or(text.len(), |h| h.byte_start);
    let preamble = paragraphs(&text[..preamble_end]);

    let mut roots = Vec::new();
    let mut stack: Vec<Draft> = Vec::new();
    for (i, heading) in headings.iter().enumerate() {
        let body_end = headings.get(i + 1).map_or(text.len(), |next| next.byte_start);
        let body = text.get(heading.byte_end..body_end).unwrap_or_default();
        close_until(&mut stack, &mut roots, heading.level);
        stack.push(Draft {
            heading: heading.title.clone(),
            level: heading.level,
            paragraphs: paragraphs(body),
            children: Vec::new(),
        });
    }
    close_until(&mut stack, &mut roots, 0);

    let mut document = Document::new(fallback_title, Vec::new());
    document.summary.clone_from(&preamble);
    document.long_summary = preamble;

    let single_root = roots.len() == 1 && roots[0].level == 1 && !roots[0].children.is_empty();
    if single_root {
        if let Some(root) = roots.pop() {
            document.title = vec![root.heading];
            if document.summary.is_empty() {
                document.summary = root.paragraphs.first().cloned().into_iter().collect();
                document.long_summary = root.paragraphs;
            }
            roots = root.children;
        }
    }

    document.children = roots
        .into_iter()
        .map(|draft| Arc::new(draft.into_section()))
        .collect();
    tracing::debug!(
        title = %document.label(),
        sections = document.children.len(),
        "built document from outline"
    );
    Ok(document)
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
