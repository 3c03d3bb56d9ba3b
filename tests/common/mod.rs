//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use movierama_client::api::ApiClient;
use movierama_client::config::{ApiConfig, SecureString, StaleTokenPolicy};
use movierama_client::session::{SessionContext, TokenStore};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

use mock_backend::{MockBackend, MockResponse};

pub const TOKEN: &str = "test-token";

/// Client pointed at the mock service with short timeouts.
pub fn api_for(backend: &MockBackend) -> ApiClient {
    let config = ApiConfig {
        base_url: backend.base_url(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config).expect("Failed to build client")
}

/// Anonymous session whose token file lives in a fresh temp dir.
pub fn temp_session(policy: StaleTokenPolicy) -> (TempDir, SessionContext) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = TokenStore::new(token_path(&dir));
    (dir, SessionContext::new(store, policy))
}

pub fn token_path(dir: &TempDir) -> PathBuf {
    dir.path().join("session").join("token")
}

pub fn user_json(id: u64) -> Value {
    json!({
        "id": id,
        "firstname": "Ada",
        "lastname": "King",
        "email": "ada@example.com",
    })
}

pub fn movie_json(id: u64, title: &str, owner_id: u64, likes: u32, hates: u32) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("About {}", title),
        "publicationDate": "1995-12-15",
        "createdDate": "2024-03-01",
        "likesCount": likes,
        "hatesCount": hates,
        "user": {"id": owner_id, "firstname": "Owner", "lastname": format!("#{}", owner_id)},
    })
}

/// Spring page body. `number` is zero-based.
pub fn page_json(movies: Vec<Value>, number: u32, total_pages: u32, total_elements: u64) -> Value {
    json!({
        "content": movies,
        "number": number,
        "size": 10,
        "totalPages": total_pages,
        "totalElements": total_elements,
    })
}

/// Signed-in session with an empty vote cache. The token is persisted and
/// attached to `api` without any request to the service.
pub fn signed_in_session(api: &ApiClient, user_id: u64) -> (TempDir, SessionContext) {
    let (dir, mut session) = temp_session(StaleTokenPolicy::Keep);
    session
        .login(api, SecureString::new(TOKEN), serde_json::from_value(user_json(user_id)).unwrap())
        .expect("login failed");
    (dir, session)
}
