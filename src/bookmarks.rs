//! The bookmark store persists saved sections as JSON.
//!
//! A bookmark is identified by its place: the document title, the section path it resolves
//! to and the section's slug. Same-named sections in other documents or under other
//! parents are different bookmarks.

use crate::error::Result;
use crate::location::Location;
use crate::path_codec::slugify;
use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
/// A saved section.
pub struct Bookmark {
    /// Slug of the section.
    pub id: String,
    /// Section label at the time it was saved.
    pub heading: String,
    /// Plain-text summary at the time it was saved.
    #[serde(default)]
    pub summary: String,
    /// Title of the containing document.
    pub title: String,
    /// Encoded path of the section within the document.
    pub section: String,
}

impl Bookmark {
    #[must_use]
    /// Bookmark for `section`, reached at `location`.
    pub fn new(section: &Section, location: &Location) -> Self {
        Self {
            id: slugify(&section.heading),
            heading: section.label(),
            summary: crate::text::join_fragments(&section.summary),
            title: location.title.clone(),
            section: location.section_path().to_string(),
        }
    }

    #[must_use]
    /// Whether both bookmarks point at the same section of the same document.
    pub fn same_place(&self, other: &Bookmark) -> bool {
        self.title == other.title && self.section == other.section && self.id == other.id
    }

    #[must_use]
    /// The location this bookmark resolves to.
    pub fn location(&self) -> Location {
        Location::new(self.title.clone()).with_section(self.section.clone())
    }
}

#[derive(Serialize, Deserialize, Default)]
struct StoredBookmarks {
    bookmarks: Vec<Bookmark>,
}

/// Saved sections, persisted to a JSON file.
#[derive(Default)]
pub struct BookmarkStore {
    path: Option<PathBuf>,
    entries: Vec<Bookmark>,
}

impl BookmarkStore {
    #[must_use]
    /// Store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads bookmarks from `path`; a missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<StoredBookmarks>(&contents)?.bookmarks,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// Writes the store to its file, if it has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let stored = StoredBookmarks {
            bookmarks: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(path, json)?;
        Ok(())
    }

    #[must_use]
    /// File backing the store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    /// Whether a bookmark for the same place as `bookmark` exists.
    pub fn contains(&self, bookmark: &Bookmark) -> bool {
        self.entries.iter().any(|b| b.same_place(bookmark))
    }

    /// Adds `bookmark`, or removes the existing one for the same place. Returns true if added.
    pub fn toggle(&mut self, bookmark: Bookmark) -> bool {
        if let Some(pos) = self.entries.iter().position(|b| b.same_place(&bookmark)) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(bookmark);
            true
        }
    }

    #[must_use]
    /// Bookmark at `index`, in insertion order.
    pub fn get(&self, index: usize) -> Option<&Bookmark> {
        self.entries.get(index)
    }

    /// All bookmarks, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.entries.iter()
    }

    #[must_use]
    /// Number of bookmarks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// True when nothing is bookmarked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/bookmarks.rs"]
mod tests;
