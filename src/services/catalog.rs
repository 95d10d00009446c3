//! In-memory catalog state backing the main view.
//!
//! [`CatalogController`] mirrors the store's collection, derives the visible
//! list from the search term and turns user intents into store calls. After
//! every successful mutation it re-reads the whole collection from the store
//! instead of patching its copy.

use crate::domain::movie::{Movie, MovieDraft, MovieInput, summary_limit};
use crate::domain::types::MovieId;
use crate::repository::{MovieReader, MovieWriter};

use super::{ServiceError, ServiceResult};

/// State of the add/edit surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Editor {
    #[default]
    Closed,
    Open {
        /// Movie being edited; `None` when adding.
        target: Option<Movie>,
        /// Current field values.
        input: MovieInput,
    },
}

impl Editor {
    pub fn is_open(&self) -> bool {
        matches!(self, Editor::Open { .. })
    }

    pub fn target(&self) -> Option<&Movie> {
        match self {
            Editor::Open { target, .. } => target.as_ref(),
            Editor::Closed => None,
        }
    }

    pub fn input(&self) -> Option<&MovieInput> {
        match self {
            Editor::Open { input, .. } => Some(input),
            Editor::Closed => None,
        }
    }
}

/// Result of submitting the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Movie),
    Updated(Movie),
    /// The edited movie no longer exists; nothing was written.
    NotFound,
    /// Title or director was blank; nothing was written and the editor stays open.
    Rejected,
}

/// Movies whose title contains `term`, ignoring case, in collection order.
pub fn filter_movies(movies: &[Movie], term: &str) -> Vec<Movie> {
    let term = term.to_lowercase();
    movies
        .iter()
        .filter(|movie| movie.title.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CatalogController {
    movies: Vec<Movie>,
    filtered: Vec<Movie>,
    search_term: String,
    editor: Editor,
}

impl CatalogController {
    /// Load the full collection from the store.
    pub fn load<R>(repo: &R) -> ServiceResult<Self>
    where
        R: MovieReader,
    {
        let mut controller = Self::default();
        controller.refresh(repo)?;
        Ok(controller)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Movies matching the current search term.
    pub fn filtered(&self) -> &[Movie] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn find(&self, id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == *id)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.apply_filter();
    }

    /// Replace the in-memory collection with the store's current contents.
    pub fn refresh<R>(&mut self, repo: &R) -> ServiceResult<()>
    where
        R: MovieReader,
    {
        match repo.read_all() {
            Ok(movies) => {
                self.movies = movies;
                self.apply_filter();
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to read movies: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Open an empty editor with no target.
    pub fn open_add(&mut self) {
        self.editor = Editor::Open {
            target: None,
            input: MovieInput::default(),
        };
    }

    /// Open the editor pre-populated from the movie with `id`.
    pub fn open_edit(&mut self, id: &MovieId) -> ServiceResult<()> {
        let Some(movie) = self.find(id).cloned() else {
            return Err(ServiceError::NotFound);
        };
        self.editor = Editor::Open {
            input: MovieInput::from(&movie),
            target: Some(movie),
        };
        Ok(())
    }

    /// Whether the editor is open on `target`; `None` means an add form.
    pub fn editor_matches(&self, target: Option<&MovieId>) -> bool {
        self.editor.is_open() && self.editor.target().map(|movie| &movie.id) == target
    }

    /// Keep `input` in the open editor without submitting it.
    pub fn stage_input(&mut self, input: MovieInput) {
        let merged = self.merge_input(input);
        if let Editor::Open { input, .. } = &mut self.editor {
            *input = merged;
        }
    }

    /// Close the editor and forget its target.
    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
    }

    /// Delete the movie with `id` once the user has confirmed.
    ///
    /// Returns `Ok(false)` without touching the store when `confirmed` is
    /// false or when the movie no longer exists.
    pub fn delete<R>(&mut self, id: &MovieId, confirmed: bool, repo: &R) -> ServiceResult<bool>
    where
        R: MovieReader + MovieWriter,
    {
        if !confirmed {
            return Ok(false);
        }

        match repo.delete_movie(id) {
            Ok(true) => {
                self.refresh(repo)?;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                log::error!("Failed to delete movie {id}: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Submit the editor: update the target when one is set, otherwise create.
    ///
    /// `input` carries the submitted field values; its genres are applied as a
    /// selection on top of the editor's current genres so that previously
    /// picked genres keep their order.
    pub fn submit<R>(&mut self, input: MovieInput, repo: &R) -> ServiceResult<SubmitOutcome>
    where
        R: MovieReader + MovieWriter,
    {
        let merged = self.merge_input(input);

        let draft = match MovieDraft::try_from(merged.clone()) {
            Ok(draft) => draft,
            Err(e) => {
                log::debug!("Ignoring incomplete movie submission: {e}");
                if let Editor::Open { input, .. } = &mut self.editor {
                    *input = merged;
                }
                return Ok(SubmitOutcome::Rejected);
            }
        };

        let outcome = match self.editor.target().map(|movie| movie.id.clone()) {
            Some(id) => match repo.update_movie(&id, draft) {
                Ok(Some(movie)) => SubmitOutcome::Updated(movie),
                Ok(None) => SubmitOutcome::NotFound,
                Err(e) => {
                    log::error!("Failed to update movie {id}: {e}");
                    return Err(ServiceError::Internal);
                }
            },
            None => match repo.create_movie(draft) {
                Ok(movie) => SubmitOutcome::Created(movie),
                Err(e) => {
                    log::error!("Failed to create movie: {e}");
                    return Err(ServiceError::Internal);
                }
            },
        };

        self.close_editor();
        self.refresh(repo)?;

        Ok(outcome)
    }

    /// Apply submitted values over the editor's current input.
    ///
    /// Genres use toggle semantics and the summary is cut to the length the
    /// form allows for the current target.
    fn merge_input(&self, input: MovieInput) -> MovieInput {
        let mut merged = self.editor.input().cloned().unwrap_or_default();
        merged.title = input.title;
        merged.director = input.director;
        merged.summary = input.summary;
        merged.image_url = input.image_url;
        merged.select_genres(&input.genres);
        merged.truncate_summary(summary_limit(self.editor.target()));
        merged
    }

    fn apply_filter(&mut self) {
        self.filtered = filter_movies(&self.movies, &self.search_term);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::{Genre, SUMMARY_MAX_CHARS};
    use crate::domain::types::{DirectorName, MovieTitle, Timestamp};
    use crate::repository::test::TestRepository;

    fn sample_movie(id: &str, title: &str) -> Movie {
        let created = Timestamp::parse("2025-08-10T12:00:00Z").unwrap();
        Movie {
            id: MovieId::new(id).unwrap(),
            title: MovieTitle::new(title).unwrap(),
            director: DirectorName::new("Director").unwrap(),
            summary: String::new(),
            genres: vec![Genre::Action, Genre::Drama],
            image_url: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn sample_repo() -> TestRepository {
        TestRepository::new(vec![
            sample_movie("1", "Jumanji"),
            sample_movie("2", "Moana"),
        ])
    }

    fn input(title: &str, director: &str) -> MovieInput {
        MovieInput {
            title: title.into(),
            director: director.into(),
            ..MovieInput::default()
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn load_fills_full_and_filtered_copies() {
        let repo = sample_repo();
        let controller = CatalogController::load(&repo).unwrap();

        assert_eq!(titles(controller.movies()), vec!["Jumanji", "Moana"]);
        assert_eq!(controller.filtered(), controller.movies());
        assert!(!controller.editor().is_open());
    }

    #[test]
    fn search_is_case_insensitive_title_substring() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();

        controller.set_search_term("jum");
        assert_eq!(titles(controller.filtered()), vec!["Jumanji"]);

        controller.set_search_term("OAN");
        assert_eq!(titles(controller.filtered()), vec!["Moana"]);

        controller.set_search_term("");
        assert_eq!(titles(controller.filtered()), vec!["Jumanji", "Moana"]);

        controller.set_search_term("zzz");
        assert!(controller.filtered().is_empty());
        assert_eq!(controller.movies().len(), 2);
    }

    #[test]
    fn search_ignores_director() {
        let movies = vec![sample_movie("1", "Jumanji")];
        assert!(filter_movies(&movies, "director").is_empty());
    }

    #[test]
    fn filter_is_recomputed_after_mutation() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        controller.set_search_term("jum");

        controller.open_add();
        controller
            .submit(input("Jumanji: The Next Level", "Jake Kasdan"), &repo)
            .unwrap();

        assert_eq!(
            titles(controller.filtered()),
            vec!["Jumanji", "Jumanji: The Next Level"]
        );
        assert_eq!(controller.search_term(), "jum");
    }

    #[test]
    fn open_edit_prepopulates_fields() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        let id = MovieId::new("2").unwrap();

        controller.open_edit(&id).unwrap();

        let editor = controller.editor();
        assert_eq!(editor.target().map(|m| m.id.as_str()), Some("2"));
        let input = editor.input().unwrap();
        assert_eq!(input.title, "Moana");
        assert_eq!(input.genres, vec![Genre::Action, Genre::Drama]);
    }

    #[test]
    fn open_edit_of_unknown_movie_keeps_state() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();

        let err = controller
            .open_edit(&MovieId::new("404").unwrap())
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
        assert!(!controller.editor().is_open());
    }

    #[test]
    fn blank_required_fields_are_rejected_silently() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        controller.open_add();

        let outcome = controller.submit(input("  ", "Someone"), &repo).unwrap();

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(repo.writes(), 0);
        assert!(controller.editor().is_open());
        assert_eq!(controller.editor().input().unwrap().director, "Someone");
    }

    #[test]
    fn submit_without_target_creates_and_reloads() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        let reads_before = repo.reads();
        controller.open_add();

        let outcome = controller.submit(input("Arrival", "Denis Villeneuve"), &repo).unwrap();

        let SubmitOutcome::Created(created) = outcome else {
            panic!("expected a created movie");
        };
        assert_eq!(created.title, "Arrival");
        assert_eq!(repo.writes(), 1);
        assert_eq!(repo.reads(), reads_before + 1);
        assert_eq!(controller.movies(), repo.snapshot().as_slice());
        assert!(!controller.editor().is_open());
    }

    #[test]
    fn submit_with_target_updates_and_reloads() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        let id = MovieId::new("1").unwrap();
        controller.open_edit(&id).unwrap();

        let mut changes = input("Jumanji (1995)", "Joe Johnston");
        changes.genres = vec![Genre::Drama, Genre::Action, Genre::Horror];
        let outcome = controller.submit(changes, &repo).unwrap();

        let SubmitOutcome::Updated(updated) = outcome else {
            panic!("expected an updated movie");
        };
        assert_eq!(updated.id, id);
        assert_eq!(
            updated.genres,
            vec![Genre::Action, Genre::Drama, Genre::Horror]
        );
        assert_eq!(controller.find(&id), Some(&updated));
        assert_eq!(controller.movies().len(), 2);
        assert_eq!(controller.editor(), &Editor::Closed);
    }

    #[test]
    fn submit_for_vanished_target_writes_nothing_and_resyncs() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        let id = MovieId::new("2").unwrap();
        controller.open_edit(&id).unwrap();
        repo.delete_movie(&id).unwrap();
        let writes_before = repo.writes();

        let outcome = controller.submit(input("Moana 2", "David Derrick"), &repo).unwrap();

        assert_eq!(outcome, SubmitOutcome::NotFound);
        assert_eq!(repo.writes(), writes_before);
        assert_eq!(titles(controller.movies()), vec!["Jumanji"]);
        assert!(!controller.editor().is_open());
    }

    #[test]
    fn long_stored_summary_survives_edit_and_cannot_grow() {
        let mut long = sample_movie("1", "Harry Potter");
        long.summary = "s".repeat(133);
        let repo = TestRepository::new(vec![long.clone()]);
        let mut controller = CatalogController::load(&repo).unwrap();
        controller.open_edit(&long.id).unwrap();

        let mut changes = input("Harry Potter 2", "David Yates");
        changes.summary = long.summary.clone();
        let SubmitOutcome::Updated(updated) = controller.submit(changes, &repo).unwrap() else {
            panic!("expected an updated movie");
        };
        assert_eq!(updated.summary, long.summary);

        controller.open_edit(&long.id).unwrap();
        let mut grown = input("Harry Potter 3", "David Yates");
        grown.summary = "s".repeat(140);
        let SubmitOutcome::Updated(updated) = controller.submit(grown, &repo).unwrap() else {
            panic!("expected an updated movie");
        };
        assert_eq!(updated.summary.chars().count(), 133);
    }

    #[test]
    fn new_movie_summary_is_capped() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        controller.open_add();

        let mut fields = input("Arrival", "Denis Villeneuve");
        fields.summary = "a".repeat(150);
        let SubmitOutcome::Created(created) = controller.submit(fields, &repo).unwrap() else {
            panic!("expected a created movie");
        };
        assert_eq!(created.summary.chars().count(), SUMMARY_MAX_CHARS);
    }

    #[test]
    fn editor_matches_only_its_own_target() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        let id = MovieId::new("1").unwrap();
        assert!(!controller.editor_matches(None));

        controller.open_add();
        assert!(controller.editor_matches(None));
        assert!(!controller.editor_matches(Some(&id)));

        controller.open_edit(&id).unwrap();
        assert!(controller.editor_matches(Some(&id)));
        assert!(!controller.editor_matches(None));
        assert!(!controller.editor_matches(Some(&MovieId::new("2").unwrap())));

        controller.close_editor();
        assert!(!controller.editor_matches(Some(&id)));
    }

    #[test]
    fn staged_input_stays_in_editor_without_writes() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        controller.open_edit(&MovieId::new("2").unwrap()).unwrap();

        let mut fields = input("Moana 2", "David Derrick");
        fields.genres = vec![Genre::Drama, Genre::Animation];
        controller.stage_input(fields);

        let staged = controller.editor().input().unwrap();
        assert_eq!(staged.title, "Moana 2");
        assert_eq!(staged.genres, vec![Genre::Drama, Genre::Animation]);
        assert_eq!(repo.writes(), 0);
        assert_eq!(titles(controller.movies()), vec!["Jumanji", "Moana"]);
    }

    #[test]
    fn delete_requires_confirmation() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        let id = MovieId::new("1").unwrap();

        assert!(!controller.delete(&id, false, &repo).unwrap());
        assert_eq!(repo.writes(), 0);
        assert_eq!(controller.movies().len(), 2);

        assert!(controller.delete(&id, true, &repo).unwrap());
        assert_eq!(titles(controller.movies()), vec!["Moana"]);
        assert_eq!(titles(controller.filtered()), vec!["Moana"]);
    }

    #[test]
    fn delete_of_unknown_movie_returns_false() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();

        let removed = controller
            .delete(&MovieId::new("404").unwrap(), true, &repo)
            .unwrap();
        assert!(!removed);
        assert_eq!(controller.movies().len(), 2);
    }

    #[test]
    fn cancel_clears_target() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        controller.open_edit(&MovieId::new("1").unwrap()).unwrap();

        controller.close_editor();
        assert_eq!(controller.editor().target(), None);

        controller.open_add();
        let outcome = controller.submit(input("New", "Someone"), &repo).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(controller.movies().len(), 3);
    }

    #[test]
    fn repository_failures_map_to_internal() {
        let repo = sample_repo();
        let mut controller = CatalogController::load(&repo).unwrap();
        repo.set_failing(true);

        controller.open_add();
        let err = controller.submit(input("A", "B"), &repo).unwrap_err();
        assert_eq!(err, ServiceError::Internal);
        assert!(controller.editor().is_open());

        let err = controller
            .delete(&MovieId::new("1").unwrap(), true, &repo)
            .unwrap_err();
        assert_eq!(err, ServiceError::Internal);
        assert!(CatalogController::load(&repo).is_err());
    }
}
