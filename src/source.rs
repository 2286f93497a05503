//! Document sources: the collaborators that fetch a document tree by title.
//!
//! The navigation core only sees [`DocumentSource::fetch`]. Reshaping of stored data into
//! the document tree happens here: flat entry lists become a one-level document, and
//! markdown files are outlined by heading.

use crate::error::{Error, Result};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::outline::document_from_text;
use crate::section::{Document, Section};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Fetches documents by title.
pub trait DocumentSource: Send + Sync {
    /// Loads the document called `title`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is absent or cannot be read.
    fn fetch(&self, title: &str) -> Result<Document>;

    /// Titles this source can serve, for the home view.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be read.
    fn titles(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One record of a flat, list-shaped document.
pub struct ListEntry {
    /// Entry title, used as the section heading.
    pub title: String,
    /// Short summary fragments.
    #[serde(default)]
    pub summary: Vec<String>,
    /// Long summary paragraphs.
    #[serde(default)]
    pub long_summary: Vec<String>,
    /// External link opened on selection.
    #[serde(default)]
    pub url: Option<String>,
    /// Category tags.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Illustration.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<ListEntry> for Section {
    fn from(entry: ListEntry) -> Self {
        Self {
            heading: vec![entry.title],
            summary: entry.summary,
            long_summary: entry.long_summary,
            children: Vec::new(),
            url: entry.url,
            categories: entry.categories,
            image_url: entry.image_url,
        }
    }
}

/// Reshapes a flat entry list into a one-level document.
#[must_use]
pub fn document_from_entries(title: &str, entries: Vec<ListEntry>) -> Document {
    let mut label = title.to_string();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Document::new(label, entries.into_iter().map(Section::from).collect())
}

/// Fields every tree-shaped document must carry as arrays.
const ARRAY_FIELDS: [&str; 4] = ["title", "summary", "longSummary", "children"];

/// Checks that `contents` is a well-formed tree-shaped document and parses it.
///
/// The top level must be an object whose `title`, `summary`, `longSummary` and `children`
/// are all arrays, with at least one title fragment.
///
/// # Errors
///
/// Returns [`Error::Json`] for text that is not JSON or does not fit the section tree, and
/// [`Error::InvalidDocument`] naming the first missing or misshapen field.
pub fn validate_document(contents: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    let Some(object) = value.as_object() else {
        return Err(Error::InvalidDocument("expected an object at the top level".to_string()));
    };
    for field in ARRAY_FIELDS {
        match object.get(field) {
            None => return Err(Error::InvalidDocument(format!("missing `{field}`"))),
            Some(found) if !found.is_array() => {
                return Err(Error::InvalidDocument(format!("`{field}` must be an array")));
            }
            Some(_) => {}
        }
    }
    if object["title"].as_array().is_some_and(Vec::is_empty) {
        return Err(Error::InvalidDocument("`title` must not be empty".to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Rejects titles that could escape the library directory.
fn checked_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() || title.contains(['/', '\\']) || title.contains("..") {
        return Err(Error::InvalidTitle(title.to_string()));
    }
    Ok(title)
}

/// Serves documents stored as files in a library directory.
///
/// For a title `t`, `t.json` is read as a document tree, or as a flat entry list when `t`
/// is one of the flat titles; failing that, `t.md` is outlined by its headings.
pub struct LibrarySource {
    root: PathBuf,
    flat_titles: Vec<String>,
}

impl LibrarySource {
    #[must_use]
    /// Library rooted at `root`, treating `flat_titles` as list-shaped.
    pub fn new(root: impl Into<PathBuf>, flat_titles: Vec<String>) -> Self {
        Self {
            root: root.into(),
            flat_titles,
        }
    }

    fn path_for(&self, title: &str, extension: &str) -> PathBuf {
        self.root.join(format!("{title}.{extension}"))
    }
}

impl DocumentSource for LibrarySource {
    fn fetch(&self, title: &str) -> Result<Document> {
        let title = checked_title(title)?;
        let json_path = self.path_for(title, "json");

        if json_path.is_file() {
            let contents = fs::read_to_string(&json_path)?;
            if self.flat_titles.iter().any(|flat| flat == title) {
                let entries: Vec<ListEntry> = serde_json::from_str(&contents)?;
                tracing::debug!(title, entries = entries.len(), "reshaping flat entry list");
                return Ok(document_from_entries(title, entries));
            }
            return Ok(serde_json::from_str(&contents)?);
        }

        let format = MarkdownFormat;
        let text_path = self.path_for(title, format.file_extension());
        if text_path.is_file() {
            let contents = fs::read_to_string(&text_path)?;
            return document_from_text(title, &contents, &format);
        }

        Err(Error::NotFound(title.to_string()))
    }

    fn titles(&self) -> Result<Vec<String>> {
        let mut titles = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let known = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "json" || ext == MarkdownFormat.file_extension());
            if let (true, Some(stem)) = (known, path.file_stem().and_then(|s| s.to_str())) {
                titles.push(stem.to_string());
            }
        }
        titles.sort();
        titles.dedup();
        Ok(titles)
    }
}

/// Serves documents held in memory.
#[derive(Default)]
pub struct MemorySource {
    documents: HashMap<String, Document>,
}

impl MemorySource {
    #[must_use]
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Adds `document` under `title`.
    pub fn with(mut self, title: impl Into<String>, document: Document) -> Self {
        self.documents.insert(title.into(), document);
        self
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, title: &str) -> Result<Document> {
        self.documents
            .get(title)
            .cloned()
            .ok_or_else(|| Error::NotFound(title.to_string()))
    }

    fn titles(&self) -> Result<Vec<String>> {
        let mut titles: Vec<String> = self.documents.keys().cloned().collect();
        titles.sort();
        Ok(titles)
    }
}

#[cfg(test)]
#[path = "tests/source.rs"]
mod tests;
