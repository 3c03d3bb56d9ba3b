use chrono::NaiveDate;
use thiserror::Error;

use crate::api::{ApiError, Movie, MovieRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} cannot be empty")]
    Missing(&'static str),

    #[error("Publication date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),
}

/// Errors from creating or editing a movie.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Sign in to submit movies")]
    NotSignedIn,

    #[error("Only the movie's owner can edit it")]
    NotOwner,

    #[error(transparent)]
    Invalid(#[from] DraftError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Form input for a new or edited movie, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
    pub publication_date: String,
}

impl MovieDraft {
    /// Pre-fill an edit form from an existing movie.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            description: movie.description.clone(),
            publication_date: movie
                .publication_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Check required fields and build the request body.
    pub fn validate(&self) -> Result<MovieRequest, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::Missing("Title"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::Missing("Description"));
        }
        let date = self.publication_date.trim();
        if date.is_empty() {
            return Err(DraftError::Missing("Publication date"));
        }
        let publication_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| DraftError::InvalidDate(date.to_string()))?;

        Ok(MovieRequest {
            title: title.to_string(),
            description: description.to_string(),
            publication_date,
        })
    }
}
