/// Like/dislike verdict for the current recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Neutral,
    Liked,
    Disliked,
}

/// Watched/not-watched mark for the current recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchedMark {
    #[default]
    Unset,
    Watched,
    NotWatched,
}

/// Watchlist affordance as the presentation layer should render it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchlistOffer {
    /// Not shown at all
    #[default]
    Hidden,
    /// Shown and clickable
    Offered,
    /// Confirmed; disabled for the rest of this recommendation's display
    Added,
}

/// Immutable view of the feedback controls handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackSnapshot {
    pub verdict: Verdict,
    pub watched: WatchedMark,
    pub watchlist: WatchlistOffer,
}

/// Feedback state machine for the current recommendation cycle
///
/// Two independent toggle pairs (like/dislike, watched/not-watched) plus the
/// watchlist affordance they control. Pure state: the side effects (feedback
/// posts, watchlist adds, auto-advance) live in the controller.
#[derive(Debug, Default)]
pub(crate) struct FeedbackState {
    verdict: Verdict,
    watched: WatchedMark,
    watchlist: WatchlistOffer,
}

impl FeedbackState {
    /// Selecting one verdict clears the opposite one.
    pub fn record_verdict(&mut self, liked: bool) {
        self.verdict = if liked {
            Verdict::Liked
        } else {
            Verdict::Disliked
        };
    }

    /// `watched` hides the watchlist affordance; `not watched` exposes it,
    /// unless an earlier add already confirmed it.
    pub fn record_watched(&mut self, watched: bool) {
        if watched {
            self.watched = WatchedMark::Watched;
            self.watchlist = WatchlistOffer::Hidden;
        } else {
            self.watched = WatchedMark::NotWatched;
            if self.watchlist != WatchlistOffer::Added {
                self.watchlist = WatchlistOffer::Offered;
            }
        }
    }

    pub fn confirm_watchlist(&mut self) {
        self.watchlist = WatchlistOffer::Added;
    }

    pub fn watchlist(&self) -> WatchlistOffer {
        self.watchlist
    }

    /// Back to all-neutral; runs whenever a new recommendation is displayed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> FeedbackSnapshot {
        FeedbackSnapshot {
            verdict: self.verdict,
            watched: self.watched,
            watchlist: self.watchlist,
        }
    }
}
