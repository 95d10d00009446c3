use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{DirectorName, MovieId, MovieTitle, Timestamp, TypeConstraintError};

/// Longest summary a user may type into the add/edit surface.
pub const SUMMARY_MAX_CHARS: usize = 100;

/// Summary length the add/edit surface accepts for `target`.
///
/// Stored summaries longer than [`SUMMARY_MAX_CHARS`] stay editable up to
/// their current length.
pub fn summary_limit(target: Option<&Movie>) -> usize {
    target
        .map_or(0, |movie| movie.summary.chars().count())
        .max(SUMMARY_MAX_CHARS)
}

/// Closed set of genres a movie can be tagged with.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Genre {
    Drama,
    Action,
    Animation,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Horror,
}

impl Genre {
    /// Every genre in display order.
    pub const ALL: [Genre; 5] = [
        Genre::Drama,
        Genre::Action,
        Genre::Animation,
        Genre::SciFi,
        Genre::Horror,
    ];

    /// Label used in persistence and on screen.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drama => "Drama",
            Self::Action => "Action",
            Self::Animation => "Animation",
            Self::SciFi => "Sci-Fi",
            Self::Horror => "Horror",
        }
    }

    /// Name of the checkbox carrying this genre in HTML forms.
    pub const fn form_key(self) -> &'static str {
        match self {
            Self::Drama => "genre_drama",
            Self::Action => "genre_action",
            Self::Animation => "genre_animation",
            Self::SciFi => "genre_sci_fi",
            Self::Horror => "genre_horror",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Genre {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == value.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("genre: {value}")))
    }
}

/// Canonical movie record as persisted by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: MovieTitle,
    pub director: DirectorName,
    pub summary: String,
    pub genres: Vec<Genre>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Movie {
    /// Builds a movie from a draft and the store-owned fields.
    pub fn from_draft(
        id: MovieId,
        draft: MovieDraft,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            director: draft.director,
            summary: draft.summary,
            genres: draft.genres,
            image_url: draft.image_url,
            created_at,
            updated_at,
        }
    }

    /// Whether the record has been edited since creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Caller-supplied movie fields; the store owns id and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: MovieTitle,
    pub director: DirectorName,
    pub summary: String,
    pub genres: Vec<Genre>,
    pub image_url: Option<String>,
}

/// Unvalidated editor contents.
///
/// This is what the add/edit surface holds while the user types; it becomes a
/// [`MovieDraft`] once title and director are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieInput {
    pub title: String,
    pub director: String,
    pub summary: String,
    pub image_url: String,
    pub genres: Vec<Genre>,
}

impl MovieInput {
    /// Removes `genre` when present, otherwise appends it.
    pub fn toggle_genre(&mut self, genre: Genre) {
        if let Some(position) = self.genres.iter().position(|g| *g == genre) {
            self.genres.remove(position);
        } else {
            self.genres.push(genre);
        }
    }

    /// Toggles genres until the selection equals `selected`, keeping the order
    /// in which surviving genres were originally picked.
    pub fn select_genres(&mut self, selected: &[Genre]) {
        let deselected: Vec<Genre> = self
            .genres
            .iter()
            .copied()
            .filter(|genre| !selected.contains(genre))
            .collect();
        for genre in deselected {
            self.toggle_genre(genre);
        }
        for genre in selected {
            if !self.genres.contains(genre) {
                self.toggle_genre(*genre);
            }
        }
    }

    /// Cuts the summary down to at most `limit` characters.
    pub fn truncate_summary(&mut self, limit: usize) {
        if let Some((end, _)) = self.summary.char_indices().nth(limit) {
            self.summary.truncate(end);
        }
    }
}

impl From<&Movie> for MovieInput {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.as_str().to_string(),
            director: movie.director.as_str().to_string(),
            summary: movie.summary.clone(),
            image_url: movie.image_url.clone().unwrap_or_default(),
            genres: movie.genres.clone(),
        }
    }
}

impl TryFrom<MovieInput> for MovieDraft {
    type Error = TypeConstraintError;

    fn try_from(input: MovieInput) -> Result<Self, Self::Error> {
        let image_url = input.image_url.trim();
        Ok(Self {
            title: MovieTitle::new(input.title)?,
            director: DirectorName::new(input.director)?,
            summary: input.summary,
            genres: input.genres,
            image_url: (!image_url.is_empty()).then(|| image_url.to_string()),
        })
    }
}
