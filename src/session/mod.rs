/// Recommendation session controller
///
/// Composes the title resolver, recommendation orchestrator, suggestion
/// debouncer and feedback state machine into the request/response lifecycle
/// the presentation layer drives. One controller instance owns one session;
/// clones share it. All state lives behind a single lock that is never held
/// across an await.
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::catalog::CatalogService;
use crate::error::{SessionError, SessionResult};
use crate::models::{ExclusionSet, Genre, Movie, UserSelection, SELECTION_SIZE};

mod events;
mod feedback;
mod suggest;

pub use events::{SlotId, UiEvent};
pub use feedback::{FeedbackSnapshot, Verdict, WatchedMark, WatchlistOffer};

use feedback::FeedbackState;
use suggest::SlotState;

/// Queries shorter than this never reach the suggestion endpoint
const MIN_QUERY_CHARS: usize = 3;

/// Timing and sizing knobs for a session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Pause after the last keystroke before a suggestion query fires
    pub debounce: Duration,
    /// Grace period after an input loses focus before its suggestions hide,
    /// long enough for a click on a suggestion item to land
    pub blur_grace: Duration,
    /// Delay before feedback automatically advances to the next
    /// recommendation
    pub advance_delay: Duration,
    /// Maximum suggestions rendered per slot
    pub suggestion_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            blur_grace: Duration::from_millis(200),
            advance_delay: Duration::from_millis(1500),
            suggestion_limit: 5,
        }
    }
}

/// Which of the three mutually exclusive display states the session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No recommendation yet
    Idle,
    /// A submit or recommendation request is in flight
    Loading,
    /// A recommendation is on screen
    Showing,
}

struct SessionState {
    phase: Phase,
    selection: Option<UserSelection>,
    excluded: ExclusionSet,
    current: Option<Movie>,
    feedback: FeedbackState,
    slots: [SlotState; SELECTION_SIZE],
    advance: Option<JoinHandle<()>>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            selection: None,
            excluded: ExclusionSet::default(),
            current: None,
            feedback: FeedbackState::default(),
            slots: std::array::from_fn(|_| SlotState::default()),
            advance: None,
        }
    }
}

struct SessionInner {
    catalog: Arc<dyn CatalogService>,
    events: UnboundedSender<UiEvent>,
    options: SessionOptions,
    session_id: Uuid,
    state: Mutex<SessionState>,
}

/// Stateful controller for one recommendation session
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<SessionInner>,
}

impl SessionController {
    /// Creates a controller and the event stream the presentation layer
    /// should consume
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        options: SessionOptions,
    ) -> (Self, UnboundedReceiver<UiEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let controller = Self {
            inner: Arc::new(SessionInner {
                catalog,
                events,
                options,
                session_id: Uuid::new_v4(),
                state: Mutex::new(SessionState::new()),
            }),
        };
        (controller, receiver)
    }

    // ========================================================================
    // Top-level operations
    // ========================================================================

    /// Resolves the four titles and requests the first recommendation.
    ///
    /// All four fields must be non-empty after trimming or the submission is
    /// rejected before any network call. Failures are returned and also
    /// emitted as an error banner.
    pub async fn submit(&self, titles: [&str; SELECTION_SIZE]) -> SessionResult<()> {
        if titles.iter().any(|title| title.trim().is_empty()) {
            let err = SessionError::EmptyTitles;
            self.emit(UiEvent::Error {
                message: err.to_string(),
            });
            return Err(err);
        }

        self.begin_loading()?;

        match self.resolve_and_recommend(titles).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.fail_loading(&err);
                Err(err)
            }
        }
    }

    /// Requests another recommendation for the existing selection
    pub async fn request_another(&self) -> SessionResult<()> {
        if !self.has_selection() {
            let err = SessionError::NoSelection;
            self.emit(UiEvent::Error {
                message: err.to_string(),
            });
            return Err(err);
        }

        self.begin_loading()?;

        match self.fetch_next().await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.fail_loading(&err);
                Err(err)
            }
        }
    }

    /// Clears all session state and cancels every pending timer
    pub fn reset(&self) {
        {
            let mut state = self.state();
            for slot in state.slots.iter_mut() {
                slot.clear_timers();
            }
            if let Some(task) = state.advance.take() {
                task.abort();
            }
            state.selection = None;
            state.excluded.clear();
            state.current = None;
            state.feedback.reset();
            state.phase = Phase::Idle;
        }

        tracing::info!(session_id = %self.inner.session_id, "Session reset");
        self.emit(UiEvent::Loading(false));
        self.emit(UiEvent::SessionReset);
    }

    // ========================================================================
    // Title resolution + recommendation orchestration
    // ========================================================================

    /// Resolves each title in input order, one lookup per title, each
    /// awaited before the next. Every resolved id becomes excluded
    /// immediately so the user's own picks can never come back as
    /// recommendations.
    async fn resolve_and_recommend(&self, titles: [&str; SELECTION_SIZE]) -> SessionResult<()> {
        // A submission always builds a fresh selection.
        self.state().selection = None;

        let mut resolved = Vec::with_capacity(SELECTION_SIZE);
        for title in titles {
            match self.inner.catalog.search_movie(title.trim()).await {
                Ok(movie) => {
                    tracing::info!(
                        session_id = %self.inner.session_id,
                        movie_id = %movie.id,
                        title = %movie.title,
                        "Resolved title"
                    );
                    self.state().excluded.insert(movie.id);
                    resolved.push(movie);
                }
                Err(err) => {
                    tracing::warn!(
                        session_id = %self.inner.session_id,
                        title = %title,
                        error = %err,
                        "Title lookup failed, skipping"
                    );
                }
            }
        }

        if resolved.is_empty() {
            return Err(SessionError::NoMoviesFound);
        }

        let selection = UserSelection::new(resolved)?;
        self.state().selection = Some(selection);

        self.fetch_next().await
    }

    /// Fetches the next recommendation.
    ///
    /// The returned id is registered in the exclusion set in the same lock
    /// acquisition that installs the new current recommendation, before the
    /// entry is handed to anyone. Two back-to-back requests can therefore
    /// never produce the same entry twice. On failure nothing is mutated.
    async fn fetch_next(&self) -> SessionResult<()> {
        let (selection, excluded) = {
            let state = self.state();
            let selection = state.selection.clone().ok_or(SessionError::NoSelection)?;
            (selection, state.excluded.ids())
        };

        let movie = self
            .inner
            .catalog
            .recommend(selection.movies(), &excluded)
            .await?;

        {
            let mut state = self.state();
            state.excluded.insert(movie.id);
            state.current = Some(movie.clone());
            state.feedback.reset();
        }

        let genres = self.fetch_genres(&movie).await;

        tracing::info!(
            session_id = %self.inner.session_id,
            movie_id = %movie.id,
            title = %movie.title,
            "Recommendation ready"
        );

        let snapshot = {
            let mut state = self.state();
            state.phase = Phase::Showing;
            state.feedback.snapshot()
        };
        self.emit(UiEvent::Loading(false));
        self.emit(UiEvent::Recommendation { movie, genres });
        self.emit(UiEvent::FeedbackChanged(snapshot));
        Ok(())
    }

    /// Best-effort genre enrichment; an empty list is fine.
    async fn fetch_genres(&self, movie: &Movie) -> Vec<Genre> {
        match self.inner.catalog.movie_details(movie.id).await {
            Ok(detailed) => detailed.genres,
            Err(err) => {
                tracing::warn!(
                    session_id = %self.inner.session_id,
                    movie_id = %movie.id,
                    error = %err,
                    "Detail lookup failed, showing recommendation without genres"
                );
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Feedback
    // ========================================================================

    /// Records a like/dislike verdict for the current recommendation and
    /// schedules the automatic advance to the next one.
    ///
    /// No-op before the first recommendation exists. The verdict post is
    /// fire-and-forget; a lost one is a log entry, not a failure.
    pub fn feedback(&self, liked: bool) {
        let (movie_id, snapshot) = {
            let mut state = self.state();
            let Some(current) = state.current.as_ref() else {
                return;
            };
            let movie_id = current.id;
            state.feedback.record_verdict(liked);
            (movie_id, state.feedback.snapshot())
        };

        self.emit(UiEvent::FeedbackChanged(snapshot));
        let message = if liked {
            "Thanks for the feedback! Getting another recommendation..."
        } else {
            "Thanks for the feedback! We will learn from this..."
        };
        self.emit(UiEvent::Notice {
            message: message.to_string(),
        });

        let catalog = Arc::clone(&self.inner.catalog);
        let session_id = self.inner.session_id;
        tokio::spawn(async move {
            if let Err(err) = catalog.record_feedback(movie_id, liked).await {
                tracing::warn!(
                    session_id = %session_id,
                    movie_id = %movie_id,
                    error = %err,
                    "Feedback post failed"
                );
            }
        });

        self.schedule_advance();
    }

    /// Marks the current recommendation watched or not watched.
    ///
    /// Not-watched also dispatches a watchlist add as a detached side
    /// effect. Both paths schedule the automatic advance. No-op before the
    /// first recommendation exists.
    pub fn mark_watched(&self, watched: bool) {
        let snapshot = {
            let mut state = self.state();
            if state.current.is_none() {
                return;
            }
            state.feedback.record_watched(watched);
            state.feedback.snapshot()
        };

        self.emit(UiEvent::FeedbackChanged(snapshot));

        if watched {
            self.emit(UiEvent::Notice {
                message: "Got it! Getting another recommendation...".to_string(),
            });
        } else {
            self.emit(UiEvent::Notice {
                message: "Added to your watchlist! Getting another recommendation...".to_string(),
            });
            let controller = self.clone();
            tokio::spawn(async move {
                // Failures surface as a recoverable banner inside the call.
                let _ = controller.add_to_watchlist().await;
            });
        }

        self.schedule_advance();
    }

    /// Adds the current recommendation to the watchlist.
    ///
    /// Idempotent from the caller's side: once confirmed, further calls are
    /// no-ops. On failure a recoverable error banner is emitted and no other
    /// session state changes.
    pub async fn add_to_watchlist(&self) -> SessionResult<()> {
        let (movie_id, title) = {
            let state = self.state();
            let Some(current) = state.current.as_ref() else {
                return Ok(());
            };
            if state.feedback.watchlist() == WatchlistOffer::Added {
                return Ok(());
            }
            (current.id, current.title.clone())
        };

        match self.inner.catalog.add_to_watchlist(movie_id, &title).await {
            Ok(()) => {
                let snapshot = {
                    let mut state = self.state();
                    // The recommendation may have advanced while the request
                    // was in flight; the confirmation belongs to its cycle.
                    if state.current.as_ref().map(|movie| movie.id) != Some(movie_id) {
                        return Ok(());
                    }
                    state.feedback.confirm_watchlist();
                    state.feedback.snapshot()
                };
                self.emit(UiEvent::FeedbackChanged(snapshot));
                self.emit(UiEvent::Notice {
                    message: "Movie added to your watchlist!".to_string(),
                });
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %self.inner.session_id,
                    movie_id = %movie_id,
                    error = %err,
                    "Watchlist add failed"
                );
                self.emit(UiEvent::Error {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Cancel-then-schedule for the automatic advance, so a second feedback
    /// action within the delay window produces exactly one new request.
    fn schedule_advance(&self) {
        let controller = self.clone();
        let delay = self.inner.options.advance_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = controller.request_another().await {
                tracing::debug!(error = %err, "Auto-advance did not produce a recommendation");
            }
        });

        let mut state = self.state();
        if let Some(previous) = state.advance.replace(task) {
            previous.abort();
        }
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    /// Debounced autocomplete entry point for one input slot.
    ///
    /// Text shorter than three characters cancels the slot's pending timer
    /// and hides its suggestions with no network call. Otherwise the slot's
    /// timer is cancelled and rescheduled; when it fires unsuperseded it
    /// issues exactly one query for the final text.
    pub fn suggestion_input(&self, slot: SlotId, text: &str) {
        let query = text.trim().to_string();

        if query.chars().count() < MIN_QUERY_CHARS {
            self.state().slots[slot.index()].supersede();
            self.emit(UiEvent::SuggestionsHidden { slot });
            return;
        }

        let token = {
            let mut state = self.state();
            let slot_state = &mut state.slots[slot.index()];
            let token = slot_state.supersede();
            slot_state.last_query = query;
            token
        };

        let controller = self.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(controller.inner.options.debounce).await;

            let query = {
                let mut state = controller.state();
                let slot_state = &mut state.slots[slot.index()];
                if !slot_state.is_current(token) {
                    return;
                }
                // From here the request is in flight: it can no longer be
                // aborted, only discarded on arrival.
                slot_state.debounce = None;
                slot_state.last_query.clone()
            };

            controller.fetch_suggestions(slot, token, query).await;
        });

        self.state().slots[slot.index()].debounce = Some(task);
    }

    /// Hides a slot's suggestions after a short grace period, so a click on
    /// a suggestion item can still land before the list disappears.
    pub fn input_blurred(&self, slot: SlotId) {
        let controller = self.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(controller.inner.options.blur_grace).await;
            controller.state().slots[slot.index()].blur_hide = None;
            controller.emit(UiEvent::SuggestionsHidden { slot });
        });

        let mut state = self.state();
        if let Some(previous) = state.slots[slot.index()].blur_hide.replace(task) {
            previous.abort();
        }
    }

    /// Re-enters the debounce path when a slot regains focus with usable
    /// text already in it.
    pub fn input_focused(&self, slot: SlotId, text: &str) {
        if text.trim().chars().count() >= MIN_QUERY_CHARS {
            self.suggestion_input(slot, text);
        }
    }

    /// Unconditionally hides every slot's suggestions (click outside all
    /// suggestion regions).
    pub fn hide_all_suggestions(&self) {
        for slot in SlotId::all() {
            self.emit(UiEvent::SuggestionsHidden { slot });
        }
    }

    async fn fetch_suggestions(&self, slot: SlotId, token: u64, query: String) {
        let result = self.inner.catalog.suggest(&query).await;

        // A newer keystroke, or a reset, owns this slot now.
        if !self.state().slots[slot.index()].is_current(token) {
            tracing::debug!(%slot, query = %query, "Dropping stale suggestion response");
            return;
        }

        match result {
            Ok(mut movies) if !movies.is_empty() => {
                movies.truncate(self.inner.options.suggestion_limit);
                self.emit(UiEvent::Suggestions { slot, movies });
            }
            Ok(_) => self.emit(UiEvent::SuggestionsHidden { slot }),
            Err(err) => {
                tracing::warn!(
                    %slot,
                    query = %query,
                    error = %err,
                    "Suggestion fetch failed"
                );
                self.emit(UiEvent::SuggestionsHidden { slot });
            }
        }
    }

    // ========================================================================
    // State inspection
    // ========================================================================

    /// The most recently displayed recommendation, if any
    pub fn current_recommendation(&self) -> Option<Movie> {
        self.state().current.clone()
    }

    /// Number of identifiers excluded from future recommendations
    pub fn excluded_count(&self) -> usize {
        self.state().excluded.len()
    }

    pub fn has_selection(&self) -> bool {
        self.state().selection.is_some()
    }

    pub fn feedback_snapshot(&self) -> FeedbackSnapshot {
        self.state().feedback.snapshot()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .state
            .lock()
            .expect("session state lock poisoned")
    }

    fn emit(&self, event: UiEvent) {
        // The receiver may be gone during teardown; nothing to do then.
        let _ = self.inner.events.send(event);
    }

    fn begin_loading(&self) -> SessionResult<()> {
        {
            let mut state = self.state();
            if state.phase == Phase::Loading {
                tracing::debug!(
                    session_id = %self.inner.session_id,
                    "Ignoring re-entrant request while loading"
                );
                return Err(SessionError::Busy);
            }
            state.phase = Phase::Loading;
        }
        self.emit(UiEvent::Loading(true));
        Ok(())
    }

    /// Returns to the phase implied by what is still on screen and raises
    /// the error banner. A failed follow-up request leaves the previously
    /// displayed recommendation intact.
    fn fail_loading(&self, err: &SessionError) {
        {
            let mut state = self.state();
            state.phase = if state.current.is_some() {
                Phase::Showing
            } else {
                Phase::Idle
            };
        }
        self.emit(UiEvent::Loading(false));
        self.emit(UiEvent::Error {
            message: err.to_string(),
        });
    }
}
