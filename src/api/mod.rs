//! HTTP access to the MovieRama service.
//!
//! All paths are relative to [`API_PREFIX`]; the bearer credential, when
//! attached, is sent as `Authorization: Bearer <token>`.

mod client;
mod error;
mod types;

pub use client::{ApiClient, API_PREFIX, REQUEST_ID_HEADER};
pub use error::{ApiError, ErrorBody, BUSINESS_RULE_CODE};
pub use types::{
    AuthenticationRequest, AuthenticationResponse, Movie, MovieId, MovieListRequest,
    MovieRequest, PageResult, RegistrationRequest, RegistrationResponse, SortDirection,
    SortField, UserId, UserIdentity, VoteCounts, VoteKind, VoteRecord, VoteRequest,
};
