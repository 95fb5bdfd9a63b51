use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backend answered `401 Unauthorized`.
    #[error("Not authenticated")]
    Unauthorized,

    /// Non-OK status with a JSON error body.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
