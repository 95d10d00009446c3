use crate::domain::movie::Movie;
use crate::repository::RepositoryResult;

const SEED_MOVIES: &str = include_str!("seed_movies.json");

/// Sample catalog written on the first read of an empty medium.
pub fn seed_movies() -> RepositoryResult<Vec<Movie>> {
    Ok(serde_json::from_str(SEED_MOVIES)?)
}
