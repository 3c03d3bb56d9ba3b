//! Multi-step account flows built on top of [`SessionContext`].

use crate::api::{ApiClient, RegistrationRequest, RegistrationResponse, UserIdentity};
use crate::session::{SessionContext, SessionError};

const MIN_PASSWORD_LEN: usize = 8;

/// Exchange credentials for a token, resolve the identity, log in and seed
/// the vote cache.
///
/// A failed vote sync is logged and does not fail the login.
pub async fn authenticate(
    api: &ApiClient,
    session: &mut SessionContext,
    email: &str,
    password: &str,
) -> Result<UserIdentity, SessionError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(SessionError::InvalidForm(
            "Email and password are required".to_string(),
        ));
    }

    let token = api.authenticate(email.trim(), password).await?;
    let user = api.user_info_with(&token).await?;
    session.login(api, token, user.clone())?;

    if let Err(err) = session.sync_votes(api).await {
        tracing::warn!(error = %err, "Failed to fetch user votes");
    }
    Ok(user)
}

/// Create an account. The service emails an activation code.
pub async fn register(
    api: &ApiClient,
    request: &RegistrationRequest,
) -> Result<RegistrationResponse, SessionError> {
    validate_registration(request)?;
    let response = api.register(request).await?;
    tracing::info!(user_id = ?response.user_id, "Account registered");
    Ok(response)
}

/// Activate an account with the code from the activation email.
pub async fn activate_account(api: &ApiClient, code: &str) -> Result<(), SessionError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(SessionError::InvalidForm(
            "Activation code is required".to_string(),
        ));
    }
    api.activate_account(code).await?;
    tracing::info!("Account activated");
    Ok(())
}

fn validate_registration(request: &RegistrationRequest) -> Result<(), SessionError> {
    let required = [
        ("Firstname", &request.firstname),
        ("Lastname", &request.lastname),
        ("Email", &request.email),
        ("Password", &request.password),
    ];
    if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(SessionError::InvalidForm(format!("{} is required", name)));
    }
    if !request.email.contains('@') {
        return Err(SessionError::InvalidForm("Email is not valid".to_string()));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SessionError::InvalidForm(format!(
            "Password should be {} characters long minimum",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
