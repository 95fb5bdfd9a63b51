//! Access to the logbook backend.
//!
//! The dashboard never owns contact data; it reads and writes it through the
//! traits below. [`http::HttpRepository`] talks to the real backend, while
//! [`mock::MockRepository`] isolates services in tests.

use crate::domain::contact::{Contact, UpdateContact};
use crate::domain::types::{ContactId, DEFAULT_PAGE_SIZE};
use crate::domain::user::UserContext;
use crate::dto::api::ContactsResponse;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Page requested from `GET /api/contacts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactListQuery {
    pub page: u32,
    pub limit: u32,
}

impl ContactListQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }
}

impl Default for ContactListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(async_fn_in_trait)]
pub trait ContactReader {
    async fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<ContactsResponse>;
}

#[allow(async_fn_in_trait)]
pub trait ContactWriter {
    async fn update_contact(
        &self,
        contact_id: ContactId,
        updates: UpdateContact,
    ) -> RepositoryResult<Contact>;
}

#[allow(async_fn_in_trait)]
pub trait UserReader {
    async fn current_user(&self) -> RepositoryResult<UserContext>;
}
