//! Events flowing from the backend worker to the UI thread.

use client_core::ControllerSnapshot;

pub enum UiEvent {
    /// Fresh controller state to render from.
    StateChanged(ControllerSnapshot),
    /// The worker could not start; the window stays up but inert.
    BackendUnavailable(String),
}
