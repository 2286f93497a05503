//! quire: progressive-disclosure navigation through deeply nested documents.
//!
//! A document is a tree of sections. The reader sees one level at a time, drills into a
//! section to reveal its children, and climbs back out through a breadcrumb trail. The
//! position is encoded as a slash-separated slug path in the location, so it survives
//! history navigation and can be shared.

pub mod app_state;
pub mod bookmarks;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod formats;
pub mod loader;
pub mod location;
pub mod logging;
pub mod outline;
pub mod path_codec;
pub mod resolver;
pub mod section;
pub mod source;
pub mod text;
pub mod ui;

pub use error::{Error, Result};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
