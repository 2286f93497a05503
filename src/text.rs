//! Plain-text rendering of the markdown fragments stored in headings and summaries.

use pulldown_cmark::{Event, Parser, TagEnd};

/// Strips markdown formatting, keeping only the readable text.
///
/// Block boundaries and line breaks collapse to single spaces, so the result is always one
/// line suitable for labels and breadcrumb entries.
#[must_use]
pub fn clean_markdown(text: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(text.trim()) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Joins text fragments with a space and removes markdown.
#[must_use]
pub fn join_fragments(fragments: &[String]) -> String {
    if fragments.is_empty() {
        return String::new();
    }
    clean_markdown(&fragments.join(" "))
}

#[cfg(test)]
#[path = "tests/text.rs"]
mod tests;
