//! Runs document fetches off the UI thread.
//!
//! Each request runs on its own thread and posts its response to a channel that the event
//! loop drains between key presses. Responses carry their ticket, so the controller can
//! drop any that arrive after a newer load began.

use crate::controller::{LoadRequest, LoadResponse};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Background fetch runner.
pub struct Loader {
    tx: Sender<LoadResponse>,
    rx: Receiver<LoadResponse>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    #[must_use]
    /// Runner with an empty response queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Starts `request` on a new thread.
    pub fn spawn(&self, request: LoadRequest) {
        let tx = self.tx.clone();
        let title = request.ticket.title.clone();
        let spawned = thread::Builder::new()
            .name(format!("fetch {title}"))
            .spawn(move || {
                // The receiver only disappears when the application is exiting.
                let _ = tx.send(request.run());
            });
        if let Err(e) = spawned {
            tracing::error!(title, error = %e, "could not start fetch thread");
        }
    }

    #[must_use]
    /// Next finished response, if any.
    pub fn try_recv(&self) -> Option<LoadResponse> {
        match self.rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/loader.rs"]
mod tests;
