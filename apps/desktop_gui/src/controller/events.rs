//! UI/backend events for the desktop search widget.

use client_core::SearchEvent;

pub enum UiEvent {
    /// Backend worker lifecycle notices for the status line.
    Info(String),
    /// The worker could not start; the widget stays interactive but every
    /// submit will report a disconnected queue.
    BackendFailed(String),
    /// A dispatched query settled (or could not be dispatched at all).
    Search(SearchEvent),
}
