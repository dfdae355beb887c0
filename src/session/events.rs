use std::fmt::Display;

use crate::models::{Genre, Movie, SELECTION_SIZE};
use crate::session::feedback::FeedbackSnapshot;

/// One of the four title input slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Creates a slot id for a zero-based index below [`SELECTION_SIZE`]
    pub fn new(index: usize) -> Option<Self> {
        (index < SELECTION_SIZE).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = SlotId> {
        (0..SELECTION_SIZE).map(SlotId)
    }
}

impl Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // One-based, matching the on-screen input numbering
        write!(f, "slot {}", self.0 + 1)
    }
}

/// State-change notifications consumed by the presentation layer
///
/// The controller never touches layout; it emits data plus the UI intent a
/// variant implies, and rendering code decides how to honor it.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Loading indicator on/off. While on, the initiating control should be
    /// disabled to prevent re-entrant submission.
    Loading(bool),

    /// Single replaceable error banner; should be scrolled into view.
    Error { message: String },

    /// Transient success banner.
    Notice { message: String },

    /// New recommendation with its (possibly empty) genre detail. Implies
    /// scrolling the card into view; a `FeedbackChanged` reset follows.
    Recommendation { movie: Movie, genres: Vec<Genre> },

    /// Autocomplete results for one slot, already truncated to the limit.
    Suggestions { slot: SlotId, movies: Vec<Movie> },

    /// Hide one slot's suggestion list.
    SuggestionsHidden { slot: SlotId },

    /// Feedback buttons or the watchlist affordance changed.
    FeedbackChanged(FeedbackSnapshot),

    /// The session returned to its initial state.
    SessionReset,
}
