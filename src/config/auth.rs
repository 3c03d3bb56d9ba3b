//! Authentication header building for API requests.

use super::credentials::SecureString;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the `Authorization: Bearer` header for a session token.
///
/// Returns `None` for an empty token so a blank stored value never
/// produces a malformed header.
pub fn build_auth_header(token: &SecureString) -> Option<AuthHeader> {
    if token.is_empty() {
        return None;
    }
    Some((
        "Authorization".to_string(),
        format!("Bearer {}", token.expose()),
    ))
}
