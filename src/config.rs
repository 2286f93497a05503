//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a quire.toml, and if present we load settings from there.
//! This provides the library location, the starting document and where state is kept.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "quire.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from quire.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "library".to_string())]
    /// Directory holding `<title>.json` and `<title>.md` documents.
    pub library_dir: String,
    #[facet(default = "essays".to_string())]
    /// Document opened when no location is given.
    pub default_title: String,
    #[facet(default = vec!["essays".to_string()])]
    /// Titles stored as flat entry lists rather than trees.
    pub flat_titles: Vec<String>,
    #[facet(default = "bookmarks.json".to_string())]
    /// Where bookmarks are persisted.
    pub bookmarks_file: String,
    #[facet(default = "quire.log".to_string())]
    /// Where log output is written.
    pub log_file: String,
    #[facet(default = 100)]
    /// Maximum line width for summary wrapping.
    pub wrap_width: usize,
    #[facet(default = false)]
    /// Start in compact mode (headings only).
    pub compact: bool,
}

impl Config {
    /// Load configuration from quire.toml if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is not valid configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from `path`, using defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents)
    }

    /// Parses configuration text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid configuration.
    pub fn parse(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
