use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod contact;
pub mod dashboard;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend rejected the caller's credentials.
    #[error("not authenticated")]
    Unauthorized,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            other => ServiceError::Repository(other),
        }
    }
}
