use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentsError {
    /// Non-OK response with no more specific meaning. The message names the
    /// action that failed.
    #[error("{0}")]
    Generic(String),

    /// The request conflicts with the account state, e.g. a coupon is
    /// already active.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid satellite URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

impl PaymentsError {
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic(message.into())
    }
}
