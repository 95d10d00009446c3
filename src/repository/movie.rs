use crate::domain::movie::{Movie, MovieDraft};
use crate::domain::types::{MovieId, Timestamp};
use crate::repository::ids::next_movie_id;
use crate::repository::seed::seed_movies;
use crate::repository::{
    MovieReader, MovieStore, MovieWriter, RepositoryResult, STORAGE_KEY,
};
use crate::storage::KeyValueStorage;

impl<S: KeyValueStorage> MovieStore<S> {
    fn seed(&self) -> RepositoryResult<Vec<Movie>> {
        let movies = seed_movies()?;
        self.write_all(&movies)?;
        log::info!("Seeded empty catalog with {} movies", movies.len());
        Ok(movies)
    }
}

impl<S: KeyValueStorage> MovieReader for MovieStore<S> {
    fn read_all(&self) -> RepositoryResult<Vec<Movie>> {
        let Some(storage) = &self.storage else {
            return Ok(Vec::new());
        };

        match storage.get_item(STORAGE_KEY)? {
            Some(raw) if !raw.is_empty() => match serde_json::from_str::<Vec<Movie>>(&raw) {
                Ok(movies) => Ok(movies),
                Err(e) => {
                    log::warn!("Stored catalog is malformed, restoring sample movies: {e}");
                    self.seed()
                }
            },
            _ => self.seed(),
        }
    }
}

impl<S: KeyValueStorage> MovieWriter for MovieStore<S> {
    fn write_all(&self, movies: &[Movie]) -> RepositoryResult<()> {
        let Some(storage) = &self.storage else {
            log::debug!("No storage attached, dropping write of {} movies", movies.len());
            return Ok(());
        };

        let raw = serde_json::to_string(movies)?;
        storage.set_item(STORAGE_KEY, &raw)?;
        Ok(())
    }

    fn create_movie(&self, draft: MovieDraft) -> RepositoryResult<Movie> {
        let mut movies = self.read_all()?;

        let now = Timestamp::now();
        let id = next_movie_id(now, &movies);
        let movie = Movie::from_draft(id, draft, now, now);

        movies.push(movie.clone());
        self.write_all(&movies)?;

        Ok(movie)
    }

    fn update_movie(&self, id: &MovieId, draft: MovieDraft) -> RepositoryResult<Option<Movie>> {
        let mut movies = self.read_all()?;

        let Some(existing) = movies.iter_mut().find(|m| m.id == *id) else {
            return Ok(None);
        };

        let updated_at = Timestamp::now()
            .max(existing.updated_at)
            .max(existing.created_at);
        let movie = Movie::from_draft(existing.id.clone(), draft, existing.created_at, updated_at);
        *existing = movie.clone();

        self.write_all(&movies)?;

        Ok(Some(movie))
    }

    fn delete_movie(&self, id: &MovieId) -> RepositoryResult<bool> {
        let mut movies = self.read_all()?;

        let before = movies.len();
        movies.retain(|m| m.id != *id);
        if movies.len() == before {
            return Ok(false);
        }

        self.write_all(&movies)?;
        Ok(true)
    }
}
