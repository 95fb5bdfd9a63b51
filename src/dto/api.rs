//! Wire shapes exchanged with the logbook backend API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::contact::Contact;
use crate::domain::pagination::PaginationInfo;
use crate::domain::user::UserContext;

/// Successful body of `GET /api/contacts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactsResponse {
    /// Page of contacts; an absent or `null` field is an empty page.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contacts: Vec<Contact>,
    pub pagination: PaginationInfo,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Contact>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Contact>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body sent by the backend alongside a non-OK status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Contact returned from a save, either bare or wrapped in `{ "contact": .. }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContactEnvelope {
    Wrapped { contact: Contact },
    Bare(Contact),
}

impl From<ContactEnvelope> for Contact {
    fn from(value: ContactEnvelope) -> Self {
        match value {
            ContactEnvelope::Wrapped { contact } => contact,
            ContactEnvelope::Bare(contact) => contact,
        }
    }
}

/// Operator profile, either bare or wrapped in `{ "user": .. }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserEnvelope {
    Wrapped { user: UserContext },
    Bare(UserContext),
}

impl From<UserEnvelope> for UserContext {
    fn from(value: UserEnvelope) -> Self {
        match value {
            UserEnvelope::Wrapped { user } => user,
            UserEnvelope::Bare(user) => user,
        }
    }
}
