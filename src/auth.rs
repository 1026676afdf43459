pub mod supabase;

use crate::{
    error::AuthError,
    models::{AuthSession, AuthUser, SignUpRequest},
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

const SESSION_TOKEN_KEY: &str = "access_token";
const SESSION_NOTICE_KEY: &str = "notice";

/// Managed authentication provider.
///
/// Credential storage, session issuance and email confirmation all happen on
/// the provider side; this is the whole surface the app relies on.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Register a new account. Metadata travels in `request.data`.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError>;

    /// Resolve the user behind an access token, `None` if the token is not valid.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

async fn session_from_parts<S: Send + Sync>(
    parts: &mut Parts,
    state: &S,
) -> Result<Session, Response> {
    Session::from_request_parts(parts, state)
        .await
        .map_err(|_| {
            tracing::error!("Failed to extract session");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

async fn token_from_session(session: &Session) -> Result<Option<String>, Response> {
    session.get(SESSION_TOKEN_KEY).await.map_err(|e| {
        tracing::error!("Failed to get access token from session: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}

/// Session that must carry a provider access token; redirects to login otherwise.
pub struct SignedIn {
    pub access_token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SignedIn
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state).await?;

        match token_from_session(&session).await? {
            Some(access_token) => Ok(SignedIn { access_token }),
            None => {
                tracing::debug!("No access token in session, redirecting to login");
                Err(Redirect::to("/login").into_response())
            }
        }
    }
}

/// Access token if the browser session has one. Never rejects on absence.
pub struct MaybeSignedIn {
    pub access_token: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeSignedIn
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state).await?;
        let access_token = token_from_session(&session).await?;
        Ok(MaybeSignedIn { access_token })
    }
}

/// Store the provider access token in the browser session
pub async fn store_access_token(session: &Session, access_token: &str) -> anyhow::Result<()> {
    session
        .insert(SESSION_TOKEN_KEY, access_token.to_string())
        .await?;
    Ok(())
}

pub async fn clear_access_token(session: &Session) -> anyhow::Result<()> {
    session.remove::<String>(SESSION_TOKEN_KEY).await?;
    Ok(())
}

/// Queue a one-shot message for the next page that reads it
pub async fn set_notice(session: &Session, notice: &str) -> anyhow::Result<()> {
    session.insert(SESSION_NOTICE_KEY, notice.to_string()).await?;
    Ok(())
}

/// Read and clear the queued message
pub async fn take_notice(session: &Session) -> anyhow::Result<Option<String>> {
    Ok(session.remove::<String>(SESSION_NOTICE_KEY).await?)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
