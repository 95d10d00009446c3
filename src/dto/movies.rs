use serde::Serialize;

use crate::domain::movie::{Genre, Movie, MovieInput, SUMMARY_MAX_CHARS, summary_limit};
use crate::domain::types::Timestamp;
use crate::services::catalog::Editor;

fn format_date(ts: Timestamp) -> String {
    ts.get().format("%b %-d, %Y").to_string()
}

fn format_date_time(ts: Timestamp) -> String {
    ts.get().format("%b %-d, %Y %H:%M UTC").to_string()
}

/// Movie card as rendered in the catalog grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCardDto {
    pub id: String,
    pub title: String,
    pub director: String,
    pub summary: String,
    pub genres: Vec<&'static str>,
    pub image_url: Option<String>,
    pub added: String,
    pub updated: Option<String>,
}

impl From<&Movie> for MovieCardDto {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.as_str().to_string(),
            title: movie.title.as_str().to_string(),
            director: movie.director.as_str().to_string(),
            summary: movie.summary.clone(),
            genres: movie.genres.iter().map(|g| g.as_str()).collect(),
            image_url: movie.image_url.clone().filter(|url| !url.is_empty()),
            added: format_date(movie.created_at),
            updated: movie.was_updated().then(|| format_date(movie.updated_at)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreOptionDto {
    pub label: &'static str,
    pub field: &'static str,
    pub selected: bool,
}

/// Add/edit form contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieFormDto {
    pub is_edit: bool,
    /// Id of the edited movie, posted back in a hidden field.
    pub id: String,
    pub title: String,
    pub director: String,
    pub summary: String,
    pub image_url: String,
    pub genres: Vec<GenreOptionDto>,
    pub remaining_chars: i64,
    pub summary_max: usize,
    /// `maxlength` of the summary field.
    pub summary_limit: usize,
    pub created: Option<String>,
    pub last_updated: Option<String>,
}

impl MovieFormDto {
    fn build(target: Option<&Movie>, input: &MovieInput) -> Self {
        let used = input.summary.chars().count() as i64;
        Self {
            is_edit: target.is_some(),
            id: target
                .map(|movie| movie.id.as_str().to_string())
                .unwrap_or_default(),
            title: input.title.clone(),
            director: input.director.clone(),
            summary: input.summary.clone(),
            image_url: input.image_url.clone(),
            genres: Genre::ALL
                .into_iter()
                .map(|genre| GenreOptionDto {
                    label: genre.as_str(),
                    field: genre.form_key(),
                    selected: input.genres.contains(&genre),
                })
                .collect(),
            remaining_chars: SUMMARY_MAX_CHARS as i64 - used,
            summary_max: SUMMARY_MAX_CHARS,
            summary_limit: summary_limit(target),
            created: target.map(|movie| format_date_time(movie.created_at)),
            last_updated: target
                .filter(|movie| movie.was_updated())
                .map(|movie| format_date_time(movie.updated_at)),
        }
    }

    /// Form for an open editor; `None` when the editor is closed.
    pub fn from_editor(editor: &Editor) -> Option<Self> {
        match editor {
            Editor::Open { target, input } => Some(Self::build(target.as_ref(), input)),
            Editor::Closed => None,
        }
    }
}
