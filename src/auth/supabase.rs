//! Supabase (GoTrue) implementation of [`AuthClient`].
//!
//! Endpoints used:
//! - `POST /auth/v1/signup` to register with user metadata
//! - `GET /auth/v1/user` to resolve the user behind an access token
//! - `POST /auth/v1/token?grant_type=password` to sign in
//! - `POST /auth/v1/logout` to revoke a session

use super::AuthClient;
use crate::{
    error::AuthError,
    models::{AuthSession, AuthUser, SignUpRequest},
};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Error body shapes returned by GoTrue across versions.
#[derive(Debug, Default, Deserialize)]
struct GoTrueErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

/// Pick the human-readable message out of an error body, falling back to the status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: GoTrueErrorBody = serde_json::from_str(body).unwrap_or_default();

    [
        parsed.msg,
        parsed.message,
        parsed.error_description,
        parsed.error,
    ]
    .into_iter()
    .flatten()
    .find(|m| !m.trim().is_empty())
    .unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => format!("HTTP {}: {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    })
}

async fn api_error(response: Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AuthError::api(status.as_u16(), error_message(status, &body))
}

#[derive(Clone)]
pub struct SupabaseAuth {
    http: reqwest::Client,
    auth_base: Url,
    anon_key: String,
}

impl SupabaseAuth {
    /// `project_url` is the project root, e.g. `https://abcd.supabase.co`.
    pub fn new(project_url: &str, anon_key: impl Into<String>) -> Result<Self, AuthError> {
        let mut base = Url::parse(project_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let auth_base = base.join("auth/v1/")?;

        Ok(Self {
            http: reqwest::Client::new(),
            auth_base,
            anon_key: anon_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        Ok(self.auth_base.join(path)?)
    }
}

#[async_trait]
impl AuthClient for SupabaseAuth {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError> {
        let url = self.endpoint("signup")?;

        tracing::info!(
            "Registering {} account with auth provider",
            request.data.role.as_str()
        );

        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let url = self.endpoint("user")?;

        let response = self
            .http
            .get(url)
            .header("apikey", &self.anon_key)
            .header("Accept", "application/json")
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Access token rejected by auth provider");
                Ok(None)
            }
            status if status.is_success() => {
                let user: AuthUser = response.json().await.map_err(|e| {
                    AuthError::InvalidResponse(format!("failed to parse user: {}", e))
                })?;
                Ok(Some(user))
            }
            _ => Err(api_error(response).await),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .header("Accept", "application/json")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(format!("failed to parse session: {}", e)))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("logout")?;

        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }
}
