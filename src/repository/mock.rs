//! Mock repository implementation for isolating services in tests.

use mockall::mock;

use crate::domain::contact::{Contact, UpdateContact};
use crate::domain::types::ContactId;
use crate::domain::user::UserContext;
use crate::dto::api::ContactsResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, UserReader};

mock! {
    pub Repository {}

    impl ContactReader for Repository {
        async fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<ContactsResponse>;
    }

    impl ContactWriter for Repository {
        async fn update_contact(
            &self,
            contact_id: ContactId,
            updates: UpdateContact,
        ) -> RepositoryResult<Contact>;
    }

    impl UserReader for Repository {
        async fn current_user(&self) -> RepositoryResult<UserContext>;
    }
}
