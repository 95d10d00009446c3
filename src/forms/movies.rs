use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::movie::{Genre, MovieInput};
use crate::domain::types::MovieId;

/// Query string of the catalog page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

impl SearchParams {
    pub fn term(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// Add/edit form as posted by the browser.
///
/// Genres arrive as one checkbox per genre, named after [`Genre::form_key`].
/// Title and director are not validated here; the catalog
/// controller ignores submissions missing them. The summary is capped by the
/// controller, which knows the stored length of the edited movie. `id` is
/// empty on the add form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct MovieForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub image_url: String,
    #[serde(default)]
    pub summary: String,
    pub genre_drama: Option<String>,
    pub genre_action: Option<String>,
    pub genre_animation: Option<String>,
    pub genre_sci_fi: Option<String>,
    pub genre_horror: Option<String>,
}

impl MovieForm {
    /// Movie the form was rendered for; `None` for the add form.
    pub fn target_id(&self) -> Option<MovieId> {
        MovieId::new(self.id.as_str()).ok()
    }

    /// Checked genres in display order.
    pub fn selected_genres(&self) -> Vec<Genre> {
        Genre::ALL
            .into_iter()
            .filter(|genre| self.checkbox(*genre).is_some())
            .collect()
    }

    fn checkbox(&self, genre: Genre) -> Option<&String> {
        match genre {
            Genre::Drama => self.genre_drama.as_ref(),
            Genre::Action => self.genre_action.as_ref(),
            Genre::Animation => self.genre_animation.as_ref(),
            Genre::SciFi => self.genre_sci_fi.as_ref(),
            Genre::Horror => self.genre_horror.as_ref(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MovieFormError {
    #[error("Movie form validation failed: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for MovieFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<MovieForm> for MovieInput {
    fn from(value: MovieForm) -> Self {
        let genres = value.selected_genres();
        Self {
            title: value.title,
            director: value.director,
            summary: value.summary,
            image_url: value.image_url,
            genres,
        }
    }
}

/// Delete confirmation as posted by the confirmation page.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteMovieForm {
    pub confirm: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteMovieFormPayload {
    pub confirmed: bool,
}

impl From<DeleteMovieForm> for DeleteMovieFormPayload {
    fn from(value: DeleteMovieForm) -> Self {
        Self {
            confirmed: value.confirm.as_deref() == Some("yes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_boxes_become_genres() {
        let form = MovieForm {
            title: "Alien".into(),
            director: "Ridley Scott".into(),
            genre_horror: Some("on".into()),
            genre_sci_fi: Some("on".into()),
            ..MovieForm::default()
        };

        let input = MovieInput::from(form);
        assert_eq!(input.genres, vec![Genre::SciFi, Genre::Horror]);
        assert_eq!(input.title, "Alien");
    }

    #[test]
    fn blank_title_still_converts() {
        let form = MovieForm {
            director: "Someone".into(),
            ..MovieForm::default()
        };
        assert!(form.validate().is_ok());
        let input = MovieInput::from(form);
        assert!(input.title.is_empty());
        assert_eq!(input.director, "Someone");
    }

    #[test]
    fn long_summary_passes_validation() {
        let form = MovieForm {
            title: "Harry Potter".into(),
            director: "David Yates".into(),
            summary: "x".repeat(133),
            ..MovieForm::default()
        };
        assert!(form.validate().is_ok());
        assert_eq!(MovieInput::from(form).summary.len(), 133);
    }

    #[test]
    fn overlong_image_url_is_rejected() {
        let form = MovieForm {
            title: "Long".into(),
            director: "Someone".into(),
            image_url: format!("https://example.com/{}", "x".repeat(2048)),
            ..MovieForm::default()
        };
        let error = MovieFormError::from(form.validate().unwrap_err());
        assert!(matches!(error, MovieFormError::Validation(_)));
    }

    #[test]
    fn target_id_is_empty_for_add_form() {
        assert_eq!(MovieForm::default().target_id(), None);

        let form = MovieForm {
            id: "4".into(),
            ..MovieForm::default()
        };
        assert_eq!(form.target_id(), MovieId::new("4").ok());
    }

    #[test]
    fn delete_requires_explicit_yes() {
        let confirmed: DeleteMovieFormPayload = DeleteMovieForm {
            confirm: Some("yes".into()),
        }
        .into();
        assert!(confirmed.confirmed);

        let declined: DeleteMovieFormPayload = DeleteMovieForm { confirm: None }.into();
        assert!(!declined.confirmed);
    }

    #[test]
    fn search_term_defaults_to_empty() {
        assert_eq!(SearchParams::default().term(), "");
    }
}
