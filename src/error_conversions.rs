//! Error conversion glue between the domain layer and the server layers.
//!
//! The domain layer must not depend on service or repository error types,
//! so the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

/// A backend payload that breaks a domain constraint cannot be decoded.
impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Decode(val.to_string())
    }
}
