/// Session-level errors
///
/// Every variant's `Display` string is the exact banner message handed to the
/// presentation layer, so this enum doubles as the user-facing message
/// catalog. Best-effort failures (detail enrichment, feedback posts,
/// suggestion fetches) are logged where they happen and never reach this
/// type's consumers.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Please fill in all movie fields.")]
    EmptyTitles,

    #[error("No movies found. Please check your movie titles and try again.")]
    NoMoviesFound,

    #[error("Only found {found} out of 4 movies. Please check your spelling and try again.")]
    ResolutionShortfall { found: usize },

    #[error("Please select your favorite movies first.")]
    NoSelection,

    /// A submit or recommendation request arrived while another was already
    /// loading. Logged no-op, never shown as a banner.
    #[error("Another request is already in progress.")]
    Busy,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error payload reported by the catalog service; the message is shown
    /// to the user as-is.
    #[error("{0}")]
    Catalog(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
