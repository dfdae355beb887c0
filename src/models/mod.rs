mod movie;
mod selection;

pub use movie::{Genre, Movie, MovieId};
pub use selection::{ExclusionSet, UserSelection, SELECTION_SIZE};
