use std::collections::HashSet;

use crate::error::{SessionError, SessionResult};
use crate::models::{Movie, MovieId};

/// Number of title input slots in a session
pub const SELECTION_SIZE: usize = 4;

/// The user's four resolved picks, in input order
///
/// Exists only when all four titles resolved; replaced wholesale on each
/// successful submission and dropped on reset.
#[derive(Debug, Clone)]
pub struct UserSelection {
    movies: [Movie; SELECTION_SIZE],
}

impl UserSelection {
    /// Builds a selection from the resolved movies.
    ///
    /// Anything other than exactly [`SELECTION_SIZE`] movies is the
    /// resolver's count-specific shortfall error.
    pub fn new(movies: Vec<Movie>) -> SessionResult<Self> {
        let found = movies.len();
        let movies: [Movie; SELECTION_SIZE] = movies
            .try_into()
            .map_err(|_| SessionError::ResolutionShortfall { found })?;
        Ok(Self { movies })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.movies.iter().map(|movie| movie.id)
    }
}

/// Identifiers that must never be recommended again this session
///
/// Holds every id belonging to the user's picks plus every id ever returned
/// as a recommendation. Grows monotonically; cleared only by a session
/// reset.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    ids: HashSet<MovieId>,
}

impl ExclusionSet {
    pub fn insert(&mut self, id: MovieId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Snapshot of the excluded ids for the recommendation request
    pub fn ids(&self) -> Vec<MovieId> {
        self.ids.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
