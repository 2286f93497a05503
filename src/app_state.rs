//! The interactive state bridging the navigation controller and the terminal UI.
//!
//! Navigation lives in the [`NavigationController`]; this layer adds what only the reader's
//! session cares about: the history the location is recorded in, the selected card, the
//! active category, compact mode, expanded cards and bookmarks. None of that reaches the
//! location, so two readers at the same location see the same position however their
//! view is set up.

use crate::bookmarks::{Bookmark, BookmarkStore};
use crate::controller::{Effect, LoadRequest, LoadResponse, NavigationController};
use crate::filter::{available_categories, empty_state, project, EmptyState};
use crate::location::{History, Location};
use crate::path_codec::slugify;
use crate::section::Section;
use crate::text::join_fragments;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Lists the documents available in the library.
    Library,
    /// Shows the current position within a document.
    Document,
    /// Lists saved bookmarks.
    Bookmarks,
}

/// Work the event loop must carry out on behalf of the state.
pub enum Task {
    /// Run this fetch in the background.
    Load(LoadRequest),
    /// Open this link outside the application.
    Open(String),
}

/// Session state of the browser.
pub struct AppState {
    /// Authority over the position in the document.
    pub controller: NavigationController,
    /// Locations visited, for back and forward.
    pub history: History,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Document titles shown in the library view.
    pub library: Vec<String>,
    /// Selected title in the library view.
    pub library_index: usize,
    /// Selected card among the visible sections.
    pub selected: usize,
    /// Active category filter.
    pub category: Option<String>,
    /// Headings only, without summaries.
    pub compact: bool,
    /// Slugs of the cards currently expanded at this level.
    pub expanded: HashSet<String>,
    /// Selected subsection within the expanded selected card.
    pub pill: Option<usize>,
    /// Saved sections.
    pub bookmarks: BookmarkStore,
    /// Selected bookmark in the bookmarks view.
    pub bookmark_index: usize,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Maximum line width for summary wrapping.
    pub wrap_width: usize,
}

impl AppState {
    #[must_use]
    /// Session over `controller`, starting in the document view.
    pub fn new(controller: NavigationController, library: Vec<String>, bookmarks: BookmarkStore) -> Self {
        Self {
            controller,
            history: History::default(),
            current_view: View::Document,
            library,
            library_index: 0,
            selected: 0,
            category: None,
            compact: false,
            expanded: HashSet::new(),
            pill: None,
            bookmarks,
            bookmark_index: 0,
            message: None,
            wrap_width: 100,
        }
    }

    /// Opens `location` as a new history entry, loading its document when needed.
    pub fn open(&mut self, location: Location) -> Option<Task> {
        self.current_view = View::Document;
        self.history.push(location.clone());
        self.reset_view();
        self.controller.on_location_change(location).map(Task::Load)
    }

    /// Applies a finished fetch.
    pub fn finish_load(&mut self, response: LoadResponse) {
        if self.controller.finish_load(response) {
            self.reset_view();
        }
    }

    #[must_use]
    /// Sections shown at the current position under the active category.
    pub fn visible_sections(&self) -> Vec<Arc<Section>> {
        project(self.controller.current_children(), self.category.as_deref())
    }

    #[must_use]
    /// Categories available at the current position.
    pub fn categories(&self) -> Vec<String> {
        available_categories(self.controller.current_children())
    }

    #[must_use]
    /// Categories available at the current position, each with the number of sections
    /// tagged with it.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let children = self.controller.current_children();
        self.categories()
            .into_iter()
            .map(|category| {
                let count = project(children, Some(category.as_str())).len();
                (category, count)
            })
            .collect()
    }

    #[must_use]
    /// Plain-text summary of the current position: the section's, or the document's at
    /// the root. Falls back to the long summary when the short one is empty.
    pub fn position_summary(&self) -> String {
        let pick = |summary: &[String], long_summary: &[String]| {
            if summary.is_empty() {
                join_fragments(long_summary)
            } else {
                join_fragments(summary)
            }
        };
        match self.controller.current_section() {
            Some(section) => pick(&section.summary, &section.long_summary),
            None => self
                .controller
                .document()
                .map(|document| pick(&document.summary, &document.long_summary))
                .unwrap_or_default(),
        }
    }

    #[must_use]
    /// Why nothing is listed, if nothing is.
    pub fn empty_state(&self) -> Option<EmptyState> {
        let visible = self.visible_sections();
        empty_state(
            self.controller.trail().len(),
            self.controller.current_children(),
            &visible,
            self.category.as_deref(),
        )
    }

    #[must_use]
    /// The card under the cursor.
    pub fn selected_section(&self) -> Option<Arc<Section>> {
        self.visible_sections().get(self.selected).cloned()
    }

    /// Moves the card cursor by `delta`, clamped to the visible list.
    pub fn move_selection(&mut self, delta: isize) {
        self.selected = step(self.selected, delta, self.visible_sections().len());
        self.pill = None;
    }

    /// Moves the library cursor by `delta`.
    pub fn move_library_selection(&mut self, delta: isize) {
        self.library_index = step(self.library_index, delta, self.library.len());
    }

    /// Moves the bookmark cursor by `delta`.
    pub fn move_bookmark_selection(&mut self, delta: isize) {
        self.bookmark_index = step(self.bookmark_index, delta, self.bookmarks.len());
    }

    /// Clears the per-level view state after the position changes.
    fn reset_view(&mut self) {
        self.selected = 0;
        self.expanded.clear();
        self.pill = None;
    }

    fn apply(&mut self, effect: Effect) -> Option<Task> {
        match effect {
            Effect::None => None,
            Effect::Push(location) => {
                self.history.push(location);
                self.reset_view();
                None
            }
            Effect::OpenExternal(url) => {
                self.message = Some(format!("Opening {url}"));
                Some(Task::Open(url))
            }
            Effect::Home => {
                self.current_view = View::Library;
                None
            }
        }
    }

    /// Descends into the selected card, or into its selected subsection.
    pub fn descend_selected(&mut self) -> Option<Task> {
        let section = self.selected_section()?;
        let pill = self
            .pill
            .and_then(|i| section.child_sections().get(i).cloned());
        let effect = match pill {
            Some(child) => self.controller.descend_path(&[section, child]),
            None => self.controller.descend(&section),
        };
        self.apply(effect)
    }

    /// Moves to breadcrumb `index`.
    pub fn jump_to_breadcrumb(&mut self, index: usize) -> Option<Task> {
        let effect = self.controller.jump_to_breadcrumb(index);
        self.apply(effect)
    }

    /// Steps up one level.
    pub fn ascend(&mut self) -> Option<Task> {
        let effect = self.controller.ascend();
        self.apply(effect)
    }

    /// Returns to the previous history entry.
    pub fn back(&mut self) -> Option<Task> {
        let location = self.history.back()?.clone();
        self.follow(location)
    }

    /// Advances to the next history entry.
    pub fn forward(&mut self) -> Option<Task> {
        let location = self.history.forward()?.clone();
        self.follow(location)
    }

    /// Applies a location that came from history rather than a user action.
    fn follow(&mut self, location: Location) -> Option<Task> {
        self.current_view = View::Document;
        self.reset_view();
        self.controller.on_location_change(location).map(Task::Load)
    }

    /// Expands or collapses the selected card.
    pub fn toggle_expanded(&mut self) {
        let Some(section) = self.selected_section() else {
            return;
        };
        let id = slugify(&section.heading);
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        self.pill = None;
    }

    #[must_use]
    /// Whether `section` is shown expanded.
    pub fn is_expanded(&self, section: &Section) -> bool {
        !self.compact && self.expanded.contains(&slugify(&section.heading))
    }

    /// Cycles the subsection cursor within the expanded selected card.
    pub fn next_pill(&mut self) {
        let Some(section) = self.selected_section() else {
            return;
        };
        let count = section.child_sections().len();
        if !self.is_expanded(&section) || count == 0 {
            self.pill = None;
            return;
        }
        self.pill = match self.pill {
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
            None => Some(0),
        };
    }

    /// Switches between compact and full cards.
    pub fn toggle_compact(&mut self) {
        self.compact = !self.compact;
        self.pill = None;
    }

    /// Selects the next (or previous) available category; wraps through "all".
    pub fn cycle_category(&mut self, forward: bool) {
        let categories = self.categories();
        if categories.is_empty() {
            self.category = None;
            return;
        }
        let current = self
            .category
            .as_ref()
            .and_then(|c| categories.iter().position(|x| x == c));
        let next = match (current, forward) {
            (None, true) => Some(0),
            (None, false) => Some(categories.len() - 1),
            (Some(i), true) => (i + 1 < categories.len()).then_some(i + 1),
            (Some(i), false) => i.checked_sub(1),
        };
        self.category = next.map(|i| categories[i].clone());
        self.selected = 0;
        self.pill = None;
    }

    /// Shows every section again.
    pub fn clear_category(&mut self) {
        self.category = None;
        self.selected = 0;
        self.pill = None;
    }

    #[must_use]
    /// Bookmark for `section`, one of the cards at the current position.
    ///
    /// A card with an external link is never part of a path, so its bookmark resolves to
    /// the level it is listed on.
    pub fn bookmark_for(&self, section: &Section) -> Bookmark {
        let id = slugify(&section.heading);
        let mut location = self.controller.location().clone();
        let parent = location.section.take().unwrap_or_default();
        let path = match (section.is_external(), parent.is_empty()) {
            (true, _) => parent,
            (false, true) => id,
            (false, false) => format!("{parent}/{id}"),
        };
        Bookmark::new(section, &location.with_section(path))
    }

    #[must_use]
    /// Whether `section`, a card at the current position, is bookmarked.
    pub fn is_bookmarked(&self, section: &Section) -> bool {
        self.bookmarks.contains(&self.bookmark_for(section))
    }

    /// Bookmarks or un-bookmarks the selected card and saves the store.
    pub fn toggle_bookmark(&mut self) {
        let Some(section) = self.selected_section() else {
            return;
        };
        let added = self.bookmarks.toggle(self.bookmark_for(&section));
        self.message = Some(match (added, self.bookmarks.save()) {
            (_, Err(e)) => format!("Error saving bookmarks: {e}"),
            (true, Ok(())) => format!("Bookmarked {}", section.label()),
            (false, Ok(())) => format!("Removed bookmark {}", section.label()),
        });
    }

    /// Deletes the bookmark under the cursor and saves the store.
    pub fn remove_selected_bookmark(&mut self) {
        let Some(bookmark) = self.bookmarks.get(self.bookmark_index).cloned() else {
            return;
        };
        self.bookmarks.toggle(bookmark.clone());
        self.bookmark_index = step(self.bookmark_index, 0, self.bookmarks.len());
        self.message = Some(match self.bookmarks.save() {
            Ok(()) => format!("Removed bookmark {}", bookmark.heading),
            Err(e) => format!("Error saving bookmarks: {e}"),
        });
    }

    /// Leaves the bookmarks view for the document, or the library if nothing is open.
    pub fn close_bookmarks(&mut self) {
        self.current_view = if self.history.is_empty() {
            View::Library
        } else {
            View::Document
        };
    }

    /// Opens the bookmark under the cursor.
    pub fn open_selected_bookmark(&mut self) -> Option<Task> {
        let location = self.bookmarks.get(self.bookmark_index)?.location();
        self.open(location)
    }

    /// Opens the library title under the cursor.
    pub fn open_selected_title(&mut self) -> Option<Task> {
        let title = self.library.get(self.library_index)?.clone();
        self.open(Location::new(title))
    }
}

/// `index` moved by `delta` and clamped to `0..len`.
fn step(index: usize, delta: isize, len: usize) -> usize {
    index.saturating_add_signed(delta).min(len.saturating_sub(1))
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
