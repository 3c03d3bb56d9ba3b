use crate::api::{ApiClient, Movie, MovieId, UserIdentity, VoteKind};
use crate::config::{Config, SecureString, StaleTokenPolicy};
use crate::session::store::TokenStore;
use crate::session::SessionError;
use crate::votes::VoteCache;

/// What happened when a stored credential was restored at start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Durable storage held no token.
    NoStoredCredential,
    /// The token validated; the identity is now known.
    Restored(UserIdentity),
    /// "Who am I" failed. `cleared` tells whether the token was dropped.
    Invalid { cleared: bool },
}

/// Explicit session state handed to every component that needs it.
///
/// Holds the bearer credential, the authenticated identity and the user's
/// vote cache. Only `login`, `logout` and `restore` change the credential.
#[derive(Debug)]
pub struct SessionContext {
    store: TokenStore,
    policy: StaleTokenPolicy,
    credential: Option<SecureString>,
    user: Option<UserIdentity>,
    votes: VoteCache,
}

impl SessionContext {
    /// Anonymous session backed by `store`. Nothing is read until `restore`.
    pub fn new(store: TokenStore, policy: StaleTokenPolicy) -> Self {
        Self {
            store,
            policy,
            credential: None,
            user: None,
            votes: VoteCache::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TokenStore::new(config.token_path()),
            config.session.stale_token_policy,
        )
    }

    /// Restore a durable credential optimistically and validate it.
    ///
    /// The token is attached to `api` before validation. On failure the
    /// identity stays unset. A token the service rejects (401/403) is dropped
    /// only under [`StaleTokenPolicy::Clear`]; any other failure keeps it.
    pub async fn restore(&mut self, api: &ApiClient) -> Result<RestoreOutcome, SessionError> {
        let Some(token) = self.store.load()? else {
            tracing::debug!("No stored credential");
            return Ok(RestoreOutcome::NoStoredCredential);
        };

        api.set_bearer(token.clone());
        self.credential = Some(token);

        match api.user_info().await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "Session restored");
                self.user = Some(user.clone());
                if let Err(err) = self.sync_votes(api).await {
                    tracing::warn!(error = %err, "Failed to fetch user votes");
                }
                Ok(RestoreOutcome::Restored(user))
            }
            Err(err) if err.is_unauthorized() => {
                tracing::warn!(error = %err, "Stored credential failed validation");
                match self.policy {
                    StaleTokenPolicy::Keep => Ok(RestoreOutcome::Invalid { cleared: false }),
                    StaleTokenPolicy::Clear => {
                        self.logout(api)?;
                        Ok(RestoreOutcome::Invalid { cleared: true })
                    }
                }
            }
            Err(err) => {
                // Outage or server fault: the token was not judged, keep it
                tracing::warn!(error = %err, "Could not validate stored credential");
                Ok(RestoreOutcome::Invalid { cleared: false })
            }
        }
    }

    /// Store the credential durably, set the identity and attach the bearer
    /// header default. The vote cache starts empty for the new identity.
    pub fn login(
        &mut self,
        api: &ApiClient,
        credential: SecureString,
        identity: UserIdentity,
    ) -> Result<(), SessionError> {
        self.store.save(&credential)?;
        api.set_bearer(credential.clone());
        tracing::info!(user_id = identity.id, "Logged in");
        self.credential = Some(credential);
        self.user = Some(identity);
        self.votes.clear();
        Ok(())
    }

    /// Clear the identity, bearer header, vote cache and durable token.
    ///
    /// In-memory state is cleared even if removing the stored token fails.
    pub fn logout(&mut self, api: &ApiClient) -> Result<(), SessionError> {
        api.clear_bearer();
        self.credential = None;
        self.user = None;
        self.votes.clear();
        tracing::info!("Logged out");
        self.store.clear()
    }

    /// Replace the vote cache with `/user/votes`. Does nothing without a
    /// credential.
    pub async fn sync_votes(&mut self, api: &ApiClient) -> Result<(), SessionError> {
        if self.credential.is_none() {
            return Ok(());
        }
        let records = api.user_votes().await?;
        self.votes.replace_all(records);
        tracing::debug!(votes = self.votes.len(), "Vote cache synced");
        Ok(())
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn votes(&self) -> &VoteCache {
        &self.votes
    }

    pub fn votes_mut(&mut self) -> &mut VoteCache {
        &mut self.votes
    }

    pub fn vote_for(&self, movie_id: MovieId) -> Option<VoteKind> {
        self.votes.get(movie_id)
    }

    /// Whether the signed-in user submitted `movie`.
    pub fn owns(&self, movie: &Movie) -> bool {
        match (self.user.as_ref(), movie.owner_id()) {
            (Some(user), Some(owner)) => user.id == owner,
            _ => false,
        }
    }
}
