//! Panel rendering for the razermon window.
//!
//! Each panel is implemented as methods on [`super::app::RazermonApp`].

mod history;
mod status;
