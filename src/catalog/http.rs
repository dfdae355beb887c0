/// HTTP implementation of [`CatalogService`]
///
/// Speaks the catalog's JSON contract: request bodies are small structured
/// records, non-success responses carry `{"error": "<message>"}` with a
/// human-readable message that is surfaced to the user verbatim.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    catalog::CatalogService,
    error::{SessionError, SessionResult},
    models::{Movie, MovieId},
};

#[derive(Clone)]
pub struct HttpCatalog {
    http_client: HttpClient,
    base_url: String,
}

// Wire types, one pair per endpoint

#[derive(Serialize)]
struct SearchRequest<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    movie: Movie,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    movies: &'a [Movie],
    excluded_ids: &'a [MovieId],
}

#[derive(Deserialize)]
struct RecommendResponse {
    recommendation: Movie,
}

#[derive(Deserialize)]
struct DetailsResponse {
    movie: Movie,
}

#[derive(Serialize)]
struct SuggestRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    movies: Vec<Movie>,
}

#[derive(Serialize)]
struct FeedbackRequest {
    recommendation_id: MovieId,
    liked: bool,
}

#[derive(Serialize)]
struct WatchlistRequest<'a> {
    movie_id: MovieId,
    title: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpCatalog {
    /// Creates a catalog client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> SessionResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decodes a response, turning non-success statuses into the service's
    /// own error message when one is present.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> SessionResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("Catalog request failed with status {status}"));

        Err(SessionError::Catalog(message))
    }
}

#[async_trait::async_trait]
impl CatalogService for HttpCatalog {
    async fn search_movie(&self, title: &str) -> SessionResult<Movie> {
        let response = self
            .http_client
            .post(self.url("/api/search-movie"))
            .json(&SearchRequest { title })
            .send()
            .await?;

        let body: SearchResponse = Self::decode(response).await?;

        tracing::debug!(
            title = %title,
            movie_id = %body.movie.id,
            "Title search completed"
        );

        Ok(body.movie)
    }

    async fn recommend(&self, selection: &[Movie], excluded: &[MovieId]) -> SessionResult<Movie> {
        let response = self
            .http_client
            .post(self.url("/api/get-recommendation"))
            .json(&RecommendRequest {
                movies: selection,
                excluded_ids: excluded,
            })
            .send()
            .await?;

        let body: RecommendResponse = Self::decode(response).await?;

        tracing::info!(
            movie_id = %body.recommendation.id,
            excluded = excluded.len(),
            "Recommendation fetched"
        );

        Ok(body.recommendation)
    }

    async fn movie_details(&self, id: MovieId) -> SessionResult<Movie> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/movie-details/{id}")))
            .send()
            .await?;

        let body: DetailsResponse = Self::decode(response).await?;
        Ok(body.movie)
    }

    async fn suggest(&self, query: &str) -> SessionResult<Vec<Movie>> {
        let response = self
            .http_client
            .post(self.url("/api/movie-suggestions"))
            .json(&SuggestRequest { query })
            .send()
            .await?;

        let body: SuggestResponse = Self::decode(response).await?;
        Ok(body.movies)
    }

    async fn record_feedback(&self, recommendation_id: MovieId, liked: bool) -> SessionResult<()> {
        let response = self
            .http_client
            .post(self.url("/api/recommendation-feedback"))
            .json(&FeedbackRequest {
                recommendation_id,
                liked,
            })
            .send()
            .await?;

        // The response body carries nothing the session needs.
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }

    async fn add_to_watchlist(&self, movie_id: MovieId, title: &str) -> SessionResult<()> {
        let response = self
            .http_client
            .post(self.url("/api/add-to-watchlist"))
            .json(&WatchlistRequest { movie_id, title })
            .send()
            .await?;

        Self::decode::<serde_json::Value>(response).await?;

        tracing::info!(movie_id = %movie_id, "Added to watchlist");
        Ok(())
    }
}
