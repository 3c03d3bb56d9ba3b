use thiserror::Error;

use crate::api::{ApiClient, ApiError, MovieId, VoteCounts, VoteKind};
use crate::session::SessionContext;

#[derive(Debug, Error)]
pub enum VoteError {
    /// Voting is gated on a session credential being present
    #[error("Sign in to vote")]
    NotSignedIn,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result of a vote submission the service answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The toggle was applied. `vote` is the user's opinion afterwards.
    /// `counts` is `None` when the follow-up count refresh failed.
    Applied {
        movie_id: MovieId,
        vote: Option<VoteKind>,
        counts: Option<VoteCounts>,
    },
    /// Business-rule rejection (errorCode 306) with the server's description.
    Rejected { description: String },
}

/// Submits vote toggles and reconciles the session's vote cache.
///
/// The service decides the toggle: the same kind twice retracts, a different
/// kind replaces. The client only interprets the returned vote object.
pub struct VoteMutator<'a> {
    api: &'a ApiClient,
}

impl<'a> VoteMutator<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn submit(
        &self,
        session: &mut SessionContext,
        movie_id: MovieId,
        kind: VoteKind,
    ) -> Result<VoteOutcome, VoteError> {
        if !session.has_credential() {
            return Err(VoteError::NotSignedIn);
        }

        let record = match self.api.cast_vote(movie_id, kind).await {
            Ok(record) => record,
            Err(ApiError::BusinessRule { description, .. }) => {
                tracing::info!(movie_id, vote = %kind, reason = %description, "Vote rejected");
                return Ok(VoteOutcome::Rejected { description });
            }
            Err(err) => {
                tracing::warn!(movie_id, vote = %kind, error = %err, "Vote failed");
                return Err(err.into());
            }
        };

        session.votes_mut().reconcile(movie_id, record.as_ref());
        let vote = session.votes().get(movie_id);

        let counts = match self.api.movie(movie_id).await {
            Ok(movie) => Some(movie.counts()),
            Err(err) => {
                tracing::warn!(movie_id, error = %err, "Failed to refresh vote counts");
                None
            }
        };

        tracing::debug!(movie_id, vote = ?vote, "Vote applied");
        Ok(VoteOutcome::Applied {
            movie_id,
            vote,
            counts,
        })
    }
}
