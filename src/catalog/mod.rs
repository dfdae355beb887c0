/// Catalog service abstraction
///
/// The session controller talks to the remote catalog exclusively through
/// this trait: one implementation speaks HTTP to the real service, tests
/// substitute a mock. The matching and recommendation algorithms behind
/// these calls are the service's concern, not ours; only the
/// request/response contract is modeled here.
use crate::{
    error::SessionResult,
    models::{Movie, MovieId},
};

pub mod http;

pub use http::HttpCatalog;

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Resolve a free-text title to its best catalog match
    async fn search_movie(&self, title: &str) -> SessionResult<Movie>;

    /// Next recommendation for the given picks
    ///
    /// The service honors `excluded`: the returned movie is never one of the
    /// listed ids.
    async fn recommend(&self, selection: &[Movie], excluded: &[MovieId]) -> SessionResult<Movie>;

    /// Extended record (genre list) for a known id
    async fn movie_details(&self, id: MovieId) -> SessionResult<Movie>;

    /// Autocomplete candidates for a partial title, best matches first
    async fn suggest(&self, query: &str) -> SessionResult<Vec<Movie>>;

    /// Record a like/dislike verdict for a recommendation
    async fn record_feedback(&self, recommendation_id: MovieId, liked: bool) -> SessionResult<()>;

    /// Add a movie to the user's watchlist
    async fn add_to_watchlist(&self, movie_id: MovieId, title: &str) -> SessionResult<()>;
}
