//! Wire types exchanged with the MovieRama service.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub type MovieId = u64;
pub type UserId = u64;

/// Server-side sort key for movie listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortField {
    #[default]
    Created,
    Likes,
    Hates,
    Published,
}

impl SortField {
    /// Query parameter value understood by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Likes => "LIKES",
            Self::Hates => "HATES",
            Self::Published => "PUBLISHED",
        }
    }

    pub fn all() -> &'static [SortField] {
        &[Self::Created, Self::Likes, Self::Hates, Self::Published]
    }

    /// Case-insensitive parse. Unknown values return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's opinion on a movie. Absence of a vote means no opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteKind {
    Like,
    Hate,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Hate => "HATE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LIKE" => Some(Self::Like),
            "HATE" => Some(Self::Hate),
            _ => None,
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user identity as returned by `/user/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteCounts {
    pub likes: u32,
    pub hates: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "user", default)]
    pub owner: Option<UserIdentity>,
    #[serde(default)]
    pub created_date: Option<NaiveDate>,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub likes_count: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub hates_count: u32,
}

impl Movie {
    pub fn counts(&self) -> VoteCounts {
        VoteCounts {
            likes: self.likes_count,
            hates: self.hates_count,
        }
    }

    pub fn owner_id(&self) -> Option<UserId> {
        self.owner.as_ref().map(|owner| owner.id)
    }
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

/// Vote object returned by the service. A missing `type` means the vote
/// was retracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type", alias = "voteType", default)]
    pub vote_type: Option<VoteKind>,
    #[serde(default)]
    pub movie_id: Option<MovieId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote_type: VoteKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthenticationRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticationResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Body for creating or editing a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    pub title: String,
    pub description: String,
    pub publication_date: NaiveDate,
}

/// Parameters of a single listing request, in the service's zero-based
/// page coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieListRequest {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub page_index: u32,
    pub size: u32,
    pub title: Option<String>,
}

/// One page of movies with its metadata. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    pub movies: Vec<Movie>,
    pub page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMetadata {
    number: Option<u32>,
    size: Option<u32>,
    total_elements: Option<u64>,
    total_pages: Option<u32>,
}

/// Spring page as sent over the wire. Metadata is accepted either flat or
/// nested under `page`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageResponse {
    #[serde(default)]
    content: Vec<Movie>,
    number: Option<u32>,
    size: Option<u32>,
    total_elements: Option<u64>,
    total_pages: Option<u32>,
    #[serde(default)]
    page: Option<PageMetadata>,
}

impl PageResponse {
    pub(crate) fn into_result(self, request: &MovieListRequest) -> PageResult {
        let nested = self.page.unwrap_or_default();
        let size = self.size.or(nested.size).unwrap_or(request.size).max(1);
        let total_elements = self
            .total_elements
            .or(nested.total_elements)
            .unwrap_or(self.content.len() as u64);
        let total_pages = self
            .total_pages
            .or(nested.total_pages)
            .unwrap_or_else(|| total_elements.div_ceil(u64::from(size)) as u32);
        let page_index = self.number.or(nested.number).unwrap_or(request.page_index);

        PageResult {
            movies: self.content,
            page: page_index + 1,
            total_pages,
            total_elements,
        }
    }
}
