//! Form definitions backing the dashboard routes.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod contact;
pub mod dashboard;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid callsign")]
    InvalidCallsign,

    #[error("unsupported page size")]
    InvalidPageSize,

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::EmptyString | TypeConstraintError::InvalidCallsign => {
                FormError::InvalidCallsign
            }
            TypeConstraintError::InvalidPageSize(_) => FormError::InvalidPageSize,
            other => FormError::InvalidValue(other.to_string()),
        }
    }
}

/// Deserializes an optional form value, treating a blank field as absent.
///
/// HTML forms submit empty inputs as `name=`, which would otherwise fail to
/// parse as a number.
pub(crate) fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}
