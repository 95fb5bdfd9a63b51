//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, normalized
//! callsigns, supported page sizes) so that once a value reaches the domain
//! layer it can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Callsign contained characters other than letters, digits and `/`.
    #[error("invalid callsign")]
    InvalidCallsign,
    /// Page size is not one of the selectable options.
    #[error("unsupported page size: {0}")]
    InvalidPageSize(u32),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ContactId, "Unique identifier for a logged contact.");
id_newtype!(UserId, "Unique identifier for a logbook operator.");

/// Upper-cased amateur radio callsign, e.g. `DL1ABC` or `VE3/G4XYZ`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Callsign(String);

impl Callsign {
    /// Trims, upper-cases and validates a callsign.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = value.into().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if !normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '/')
        {
            return Err(TypeConstraintError::InvalidCallsign);
        }
        Ok(Self(normalized))
    }

    /// Borrow the callsign as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Callsign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Callsign {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Callsign {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Callsign> for String {
    fn from(value: Callsign) -> Self {
        value.0
    }
}

/// Page sizes offered by the pagination control.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// Number of rows requested when the dashboard is first opened.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A page size restricted to [`PAGE_SIZE_OPTIONS`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if PAGE_SIZE_OPTIONS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPageSize(value))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<u32> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sanitizes free text entered by the operator.
///
/// Markup is stripped and surrounding whitespace removed; blank input yields
/// `None` so optional fields are omitted rather than stored empty.
pub fn sanitize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| ammonia::clean(&s).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trims optional input, mapping blank strings to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
