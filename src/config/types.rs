use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::{SortDirection, SortField};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote service connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme + host + port of the service (e.g., "http://localhost:8080").
    /// The `/api/v1` prefix is appended by the client.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Defaults for movie list screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Movies per page (default: 10).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub sort_field: SortField,
    #[serde(default)]
    pub sort_direction: SortDirection,
    /// Drop fetch completions that are older than the latest issued fetch.
    #[serde(default = "default_discard_stale")]
    pub discard_stale_responses: bool,
}

/// Durable session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Where the bearer token is persisted. Defaults to the platform data dir.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
    #[serde(default)]
    pub stale_token_policy: StaleTokenPolicy,
}

/// What to do with a stored token that fails "who am I" validation on start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StaleTokenPolicy {
    /// Leave the token in place; the identity simply stays unset.
    #[default]
    Keep,
    /// Remove the token from durable storage and from the client.
    Clear,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> u32 {
    10
}

fn default_discard_stale() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            discard_stale_responses: default_discard_stale(),
        }
    }
}
