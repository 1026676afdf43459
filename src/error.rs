use thiserror::Error;

/// Errors returned by the auth provider client.
///
/// The display string of every variant is what the signup form shows, so
/// provider messages are rendered without a prefix.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid auth provider URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid auth provider response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        AuthError::Api {
            status,
            message: message.into(),
        }
    }
}
