use thiserror::Error;

/// Error types that can occur when talking to the dashboard backends.
#[derive(Debug, Error)]
pub enum DhError {
    /// No bearer token in the session store; checked before any network call
    #[error("Not authenticated. Please log in.")]
    NotAuthenticated,
    /// The identity-provider token exchange failed (HTTP or response shape)
    #[error("Token exchange failed: {0}")]
    ExchangeFailed(String),
    /// Non-2xx response from a config endpoint, with the server message when present
    #[error("API error: {0}")]
    Api(String),
    /// A document failed the pre-save checks, or a confirmation gate was not met
    #[error("Validation error: {0}")]
    Validation(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    Json(String),
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
}

/// Transport failures carry no structured server body, so they normalize
/// into `Api` with the reqwest message.
impl From<reqwest::Error> for DhError {
    fn from(err: reqwest::Error) -> Self {
        DhError::Api(err.to_string())
    }
}

impl From<serde_json::Error> for DhError {
    fn from(err: serde_json::Error) -> Self {
        DhError::Json(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
