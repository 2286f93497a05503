//! Error types shared by the document sources, stores and configuration.
//!
//! Navigation itself never fails: unresolvable paths truncate and failed fetches become a
//! not-found state. These errors belong to the collaborators around the navigation core.

use thiserror::Error;

/// Unified error type for quire operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document, entry list or bookmark file was not valid JSON for its shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `quire.toml` could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// A markdown document could not be parsed into an outline.
    #[error("Markdown error: {0}")]
    Markdown(String),

    /// No document exists under the requested title.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// The title cannot name a document (empty, or contains a path separator).
    #[error("Invalid document title: {0:?}")]
    InvalidTitle(String),

    /// A tree-shaped document file is missing a required field or has one of the wrong
    /// shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A location string could not be decoded.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
