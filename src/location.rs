//! The shareable location surface and the browser-style history behind it.
//!
//! A location names a document by title in its single path segment and carries the
//! in-document position in the `section` query parameter:
//!
//! ```text
//! /How%20to%20Start?section=intro/origins
//! ```

use crate::error::{Error, Result};
use std::fmt;
use url::{form_urlencoded, Position, Url};

/// Name of the query parameter holding the encoded slug path.
pub const SECTION_PARAM: &str = "section";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A document title plus an optional in-document path.
pub struct Location {
    /// Decoded document title.
    pub title: String,
    /// Encoded slug path; `None` means the document root.
    pub section: Option<String>,
}

impl Location {
    #[must_use]
    /// The root of the document called `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            section: None,
        }
    }

    #[must_use]
    /// Replaces the section parameter; an empty path clears it.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        let section = section.into();
        self.section = (!section.is_empty()).then_some(section);
        self
    }

    #[must_use]
    /// The section parameter, or the empty path at the document root.
    pub fn section_path(&self) -> &str {
        self.section.as_deref().unwrap_or_default()
    }

    /// Parses `/<title>?section=<path>`.
    ///
    /// The leading slash is optional. Unknown query parameters are ignored, the last
    /// `section` wins, and an empty `section` value is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLocation`] if the input is not a URL path, the title is empty,
    /// or the title is not valid percent-encoded UTF-8.
    pub fn parse(input: &str) -> Result<Self> {
        let relative = format!("/{}", input.trim().trim_start_matches('/'));
        let url = base_url()?
            .join(&relative)
            .map_err(|e| Error::InvalidLocation(format!("{input:?}: {e}")))?;

        let raw_title = url.path().trim_start_matches('/').trim_end_matches('/');
        let title = urlencoding::decode(raw_title)
            .map_err(|e| Error::InvalidLocation(format!("{raw_title:?}: {e}")))?
            .into_owned();
        if title.is_empty() {
            return Err(Error::InvalidLocation(format!("no document title in {input:?}")));
        }

        let section = url
            .query_pairs()
            .filter(|(key, _)| key == SECTION_PARAM)
            .last()
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        Ok(Self::new(title).with_section(section))
    }
}

/// Fixed base that location paths are resolved against.
const BASE: &str = "quire:///";

fn base_url() -> Result<Url> {
    Url::parse(BASE).map_err(|e| Error::InvalidLocation(e.to_string()))
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut url = base_url().map_err(|_| fmt::Error)?;
        url.path_segments_mut()
            .map_err(|()| fmt::Error)?
            .pop_if_empty()
            .push(&self.title);
        if let Some(section) = &self.section {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair(SECTION_PARAM, section)
                .finish()
                .replace("%2F", "/");
            url.set_query(Some(&query));
        }
        f.write_str(&url[Position::BeforePath..])
    }
}

/// Browser-style navigation history.
///
/// Pushing drops any forward entries; back and forward only move the cursor and hand the
/// location back to the caller, which treats it as an external change.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Location>,
    cursor: usize,
}

impl History {
    #[must_use]
    /// History holding only `start`.
    pub fn new(start: Location) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    /// Records a new location after the current one.
    pub fn push(&mut self, location: Location) {
        if self.current() == Some(&location) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    #[must_use]
    /// The location the cursor points at.
    pub fn current(&self) -> Option<&Location> {
        self.entries.get(self.cursor)
    }

    /// Steps back one entry.
    pub fn back(&mut self) -> Option<&Location> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    /// Steps forward one entry.
    pub fn forward(&mut self) -> Option<&Location> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    #[must_use]
    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// True before anything was pushed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/location.rs"]
mod tests;
