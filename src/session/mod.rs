//! Session Store: credential, identity and vote cache lifecycle.

mod context;
mod flows;
mod store;

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

pub use context::{RestoreOutcome, SessionContext};
pub use flows::{activate_account, authenticate, register};
pub use store::TokenStore;

/// Errors that can occur during session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access token store '{path}': {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    InvalidForm(String),
}

impl SessionError {
    /// Message suitable for showing to a user.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
