//! Format trait and implementations for document types parsed with tree-sitter.
//!
//! A format provides the grammar and the queries that locate headings, which is all the
//! outline builder needs to turn a text file into a section tree.

pub mod markdown;

/// Grammar and queries used to extract an outline from a text document.
pub trait Format {
    /// File extension (without the dot) of documents in this format.
    fn file_extension(&self) -> &'static str;
    /// Tree-sitter grammar for the format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading node as `@heading`.
    fn section_query(&self) -> &str;
    /// Node kind holding the heading text inside a heading node.
    fn title_kind(&self) -> &str;
    /// Nesting depth of a heading, from the kind of one of its child nodes.
    fn heading_level(&self, marker_kind: &str) -> Option<usize>;
}
