use crate::domain::movie::{Movie, MovieDraft};
use crate::domain::types::MovieId;
use crate::storage::KeyValueStorage;

pub mod errors;
pub mod ids;
pub mod movie;
pub mod seed;

pub use errors::{RepositoryError, RepositoryResult};

/// Key of the storage slot holding the serialized catalog.
pub const STORAGE_KEY: &str = "movies-data";

/// Movie store persisting the whole catalog as one JSON array in a
/// key-value medium.
///
/// Every mutation reads the full collection, changes it in memory and writes
/// it back. The sequence is not atomic: two writers sharing one medium can
/// lose updates, so callers must funnel mutations through a single owner.
#[derive(Clone, Debug)]
pub struct MovieStore<S> {
    storage: Option<S>,
}

impl<S: KeyValueStorage> MovieStore<S> {
    /// Create a store writing into `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Store with no medium attached: reads are empty and writes are dropped.
    pub fn detached() -> Self {
        Self { storage: None }
    }

    /// Whether a medium is attached.
    pub fn is_attached(&self) -> bool {
        self.storage.is_some()
    }
}

/// Read-only operations over the movie catalog.
pub trait MovieReader {
    /// Return the full collection, seeding the medium on first use.
    fn read_all(&self) -> RepositoryResult<Vec<Movie>>;
}

/// Write operations over the movie catalog.
pub trait MovieWriter {
    /// Replace the entire persisted collection.
    fn write_all(&self, movies: &[Movie]) -> RepositoryResult<()>;
    /// Persist a new movie, assigning its id and timestamps.
    fn create_movie(&self, draft: MovieDraft) -> RepositoryResult<Movie>;
    /// Overwrite a movie's fields; `None` when the id is unknown.
    fn update_movie(&self, id: &MovieId, draft: MovieDraft) -> RepositoryResult<Option<Movie>>;
    /// Remove a movie; `false` when the id is unknown.
    fn delete_movie(&self, id: &MovieId) -> RepositoryResult<bool>;
}
