//! The navigation controller: the single authority over where the user is in a document.
//!
//! Three triggers move the position: loading a document, an external location change
//! (history back/forward, a pasted link), and user actions (selecting a section or a
//! breadcrumb). Loads and external changes both run the resolver from the document root
//! and replace the trail wholesale, so the location stays the source of truth. User
//! actions update the trail and hand back the new location as an [`Effect`] for the host
//! to record.
//!
//! Fetching is split into [`NavigationController::begin_load`] and
//! [`NavigationController::finish_load`] so that the host can run the fetch elsewhere.
//! Each load gets a [`LoadTicket`], and a response whose ticket is no longer pending is
//! dropped.

use crate::location::Location;
use crate::path_codec::encode;
use crate::resolver::{is_addressable, resolve, root_trail, BreadcrumbItem, ROOT_DEPTH};
use crate::section::{Document, Section};
use crate::source::DocumentSource;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Identifies one fetch so that late responses can be recognised.
pub struct LoadTicket {
    /// Title the fetch was issued for.
    pub title: String,
    /// Sequence number of the fetch within this controller.
    pub generation: u64,
}

/// A pending fetch, ready to run on any thread.
pub struct LoadRequest {
    /// Ticket the response must carry back.
    pub ticket: LoadTicket,
    source: Arc<dyn DocumentSource>,
}

impl LoadRequest {
    #[must_use]
    /// Performs the fetch. Any failure becomes an absent document.
    pub fn run(self) -> LoadResponse {
        let document = match self.source.fetch(&self.ticket.title) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!(title = %self.ticket.title, error = %e, "document fetch failed");
                None
            }
        };
        LoadResponse {
            ticket: self.ticket,
            document,
        }
    }
}

/// Outcome of a fetch, tagged with its ticket.
pub struct LoadResponse {
    /// Ticket of the request that produced this response.
    pub ticket: LoadTicket,
    /// The fetched document, or `None` when absent or unreachable.
    pub document: Option<Document>,
}

#[derive(Clone, Debug)]
/// Availability of the document.
pub enum LoadState {
    /// No document requested yet.
    Idle,
    /// A fetch is outstanding.
    Loading(LoadTicket),
    /// The whole document is available.
    Ready(Arc<Document>),
    /// The last fetch found nothing. Terminal until another load.
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What the host must do after a user action.
pub enum Effect {
    /// Nothing changed.
    None,
    /// Record this location as a new history entry.
    Push(Location),
    /// Open an outside resource; navigation state is unchanged.
    OpenExternal(String),
    /// Leave the document for the application home view.
    Home,
}

/// Owns the document, the breadcrumb trail and the current children.
pub struct NavigationController {
    source: Arc<dyn DocumentSource>,
    state: LoadState,
    location: Location,
    trail: Vec<BreadcrumbItem>,
    children: Vec<Arc<Section>>,
    generation: u64,
}

impl NavigationController {
    #[must_use]
    /// Controller fetching through `source`.
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            state: LoadState::Idle,
            location: Location::new(String::new()),
            trail: Vec::new(),
            children: Vec::new(),
            generation: 0,
        }
    }

    #[must_use]
    /// Current location, mirroring the trail.
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    /// Document availability.
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    /// The loaded document, if ready.
    pub fn document(&self) -> Option<&Arc<Document>> {
        match &self.state {
            LoadState::Ready(document) => Some(document),
            _ => None,
        }
    }

    #[must_use]
    /// Root entries followed by the sections from the root to the current position.
    pub fn trail(&self) -> &[BreadcrumbItem] {
        &self.trail
    }

    #[must_use]
    /// Navigable children at the current position.
    pub fn current_children(&self) -> &[Arc<Section>] {
        &self.children
    }

    #[must_use]
    /// The section at the current position; `None` at the document root.
    pub fn current_section(&self) -> Option<&Arc<Section>> {
        self.trail.last().and_then(|item| item.section.as_ref())
    }

    #[must_use]
    /// True while a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }

    #[must_use]
    /// True after a fetch found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.state, LoadState::NotFound)
    }

    /// Starts loading `location.title`, superseding any outstanding fetch.
    ///
    /// Navigation state is cleared until the response arrives; its section parameter is
    /// resolved then.
    pub fn begin_load(&mut self, location: Location) -> LoadRequest {
        self.generation += 1;
        let ticket = LoadTicket {
            title: location.title.clone(),
            generation: self.generation,
        };
        tracing::info!(title = %ticket.title, generation = ticket.generation, "loading document");
        self.location = location;
        self.state = LoadState::Loading(ticket.clone());
        self.trail.clear();
        self.children.clear();
        LoadRequest {
            ticket,
            source: Arc::clone(&self.source),
        }
    }

    /// Applies a fetch response. Returns false when the response was stale and dropped.
    pub fn finish_load(&mut self, response: LoadResponse) -> bool {
        let pending = matches!(&self.state, LoadState::Loading(ticket) if *ticket == response.ticket);
        if !pending {
            tracing::debug!(
                title = %response.ticket.title,
                generation = response.ticket.generation,
                "dropping stale document response"
            );
            return false;
        }

        match response.document {
            Some(document) => {
                let document = Arc::new(document);
                self.state = LoadState::Ready(Arc::clone(&document));
                self.apply_path(&document);
                tracing::info!(
                    title = %self.location.title,
                    depth = self.trail.len(),
                    "document ready"
                );
            }
            None => {
                tracing::info!(title = %self.location.title, "document not found");
                self.state = LoadState::NotFound;
                self.trail.clear();
                self.children.clear();
            }
        }
        true
    }

    /// Fetches and applies `location` on the calling thread.
    pub fn load_document(&mut self, location: Location) {
        let request = self.begin_load(location);
        let response = request.run();
        self.finish_load(response);
    }

    /// Re-resolves the trail from the current section parameter.
    fn apply_path(&mut self, document: &Document) {
        let resolution = resolve(document, self.location.section_path());
        if resolution.is_truncated() {
            tracing::debug!(
                path = self.location.section_path(),
                matched = resolution.matched,
                requested = resolution.requested,
                "section path truncated to deepest valid ancestor"
            );
        }
        self.trail = resolution.trail;
        self.children = resolution.children;
    }

    /// Follows a section path that changed outside the controller.
    ///
    /// The trail is rebuilt from the document root, never patched. While a fetch is
    /// outstanding the path is kept and applied once the document arrives.
    pub fn on_external_path_change(&mut self, path: Option<&str>) {
        self.location.section = path.filter(|p| !p.is_empty()).map(str::to_string);
        if let Some(document) = self.document().cloned() {
            self.apply_path(&document);
        }
    }

    /// Follows a whole location that changed outside the controller.
    ///
    /// A different title starts a new load, returned for the host to run. So does the same
    /// title after it was not found.
    pub fn on_location_change(&mut self, location: Location) -> Option<LoadRequest> {
        let same_document = matches!(self.state, LoadState::Ready(_) | LoadState::Loading(_))
            && location.title == self.location.title;
        if same_document {
            self.on_external_path_change(location.section.as_deref());
            None
        } else {
            Some(self.begin_load(location))
        }
    }

    fn navigable_document(&self, action: &str) -> Option<Arc<Document>> {
        let document = self.document().cloned();
        if document.is_none() {
            tracing::warn!(action, state = self.state_name(), "ignoring navigation without a ready document");
        }
        document
    }

    /// Selects one of the current children.
    pub fn descend(&mut self, section: &Arc<Section>) -> Effect {
        self.descend_path(std::slice::from_ref(section))
    }

    /// Selects a descendant through its explicit ancestor chain.
    ///
    /// `chain[0]` must be one of the current children and every later element a child of
    /// the one before it. If the chain reaches a section with an external link, that link
    /// is opened instead and nothing else changes. A section whose heading has no slug
    /// cannot be written into the location, so the chain stops there with no effect.
    pub fn descend_path(&mut self, chain: &[Arc<Section>]) -> Effect {
        if self.navigable_document("descend").is_none() || chain.is_empty() {
            return Effect::None;
        }

        let mut siblings = self.children.clone();
        for section in chain {
            if !siblings.iter().any(|s| Arc::ptr_eq(s, section)) {
                tracing::warn!(heading = %section.label(), "section is not reachable from the current position");
                return Effect::None;
            }
            if let Some(url) = section.external_url() {
                tracing::info!(url, "opening external section");
                return Effect::OpenExternal(url.to_string());
            }
            if !is_addressable(section) {
                tracing::warn!("section heading has no slug; it cannot be part of a path");
                return Effect::None;
            }
            siblings = section.child_sections();
        }

        self.trail.extend(chain.iter().map(BreadcrumbItem::for_section));
        self.children = siblings;
        self.sync_location()
    }

    /// Moves to breadcrumb `index`, keeping the entries up to and including it.
    ///
    /// Index 0 leaves the document for the home view. Index 1 is the document root and
    /// always clears the section parameter.
    pub fn jump_to_breadcrumb(&mut self, index: usize) -> Effect {
        let Some(document) = self.navigable_document("jump") else {
            return Effect::None;
        };
        if index == 0 {
            return Effect::Home;
        }
        if index < ROOT_DEPTH {
            // The root always clears the parameter, even one that resolved to nothing.
            let had_section = self.location.section.is_some();
            self.trail = root_trail(&document);
            self.children = document.child_sections();
            if !had_section {
                return Effect::None;
            }
        } else {
            if index + 1 >= self.trail.len() {
                return Effect::None;
            }
            self.trail.truncate(index + 1);
            match self.trail[index].section.clone() {
                Some(section) => self.children = section.child_sections(),
                None => {
                    let path = encode(&self.trail);
                    let resolution = resolve(&document, &path);
                    self.trail = resolution.trail;
                    self.children = resolution.children;
                }
            }
        }
        self.sync_location()
    }

    /// Steps up to the parent of the current position.
    pub fn ascend(&mut self) -> Effect {
        match self.trail.len() {
            0..=ROOT_DEPTH => Effect::None,
            depth => self.jump_to_breadcrumb(depth - 2),
        }
    }

    fn sync_location(&mut self) -> Effect {
        let path = encode(&self.trail);
        self.location = self.location.clone().with_section(path);
        Effect::Push(self.location.clone())
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            LoadState::Idle => "idle",
            LoadState::Loading(_) => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::NotFound => "not_found",
        }
    }

    #[must_use]
    /// Serialisable summary of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            location: self.location.to_string(),
            state: self.state_name(),
            trail: self
                .trail
                .iter()
                .map(|item| SnapshotCrumb {
                    id: item.id.clone(),
                    label: item.label.clone(),
                })
                .collect(),
            children: self
                .children
                .iter()
                .map(|section| SnapshotChild {
                    id: crate::path_codec::slugify(&section.heading),
                    label: section.label(),
                    url: section.external_url().map(str::to_string),
                    categories: section.categories.clone(),
                    leaf: section.is_leaf(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
/// Serialisable view of the controller state.
pub struct Snapshot {
    /// Current location string.
    pub location: String,
    /// `idle`, `loading`, `ready` or `not_found`.
    pub state: &'static str,
    /// Breadcrumb trail.
    pub trail: Vec<SnapshotCrumb>,
    /// Current children.
    pub children: Vec<SnapshotChild>,
}

#[derive(Debug, Serialize)]
/// A breadcrumb entry in a [`Snapshot`].
pub struct SnapshotCrumb {
    /// Slug or root id.
    pub id: String,
    /// Display label.
    pub label: String,
}

#[derive(Debug, Serialize)]
/// A child section in a [`Snapshot`].
pub struct SnapshotChild {
    /// Slug among its siblings.
    pub id: String,
    /// Display label.
    pub label: String,
    /// External link, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Category tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Whether it has no navigable children.
    pub leaf: bool,
}

#[cfg(test)]
#[path = "tests/controller.rs"]
mod tests;
