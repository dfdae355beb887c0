//! Client-side controller for a MovieMatch recommendation session.
//!
//! Turns four user-entered movie titles into an iterative, feedback-driven
//! recommendation session against a remote catalog service: resolves
//! free-text titles to canonical entries, requests recommendations while
//! excluding everything already shown, debounces per-slot autocomplete, and
//! drives the like/dislike/watched feedback loop that automatically advances
//! to the next recommendation.
//!
//! The presentation layer consumes [`session::UiEvent`] notifications from
//! the channel handed out by [`session::SessionController::new`] and calls
//! back into the controller on user actions; it never shares state with it.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use catalog::{CatalogService, HttpCatalog};
pub use config::Config;
pub use error::{SessionError, SessionResult};
pub use models::{ExclusionSet, Genre, Movie, MovieId, UserSelection, SELECTION_SIZE};
pub use session::{
    FeedbackSnapshot, SessionController, SessionOptions, SlotId, UiEvent, Verdict, WatchedMark,
    WatchlistOffer,
};
