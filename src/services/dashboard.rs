//! View state of the contacts dashboard.
//!
//! [`Dashboard`] holds the page of contacts currently on screen together with
//! the pagination metadata, loading flags, error text and edit selection.
//! A fetch is [`Dashboard::begin_fetch`], which marks the state as loading
//! and returns the query to send, followed by [`Dashboard::settle_fetch`],
//! which applies the backend's answer. [`Dashboard::fetch_contacts`] runs
//! both around the backend call; `mount` and the pagination handlers pick
//! the page and size for it.

use crate::domain::contact::Contact;
use crate::domain::pagination::PaginationInfo;
use crate::domain::types::{ContactId, DEFAULT_PAGE_SIZE, PageSize};
use crate::dto::api::ContactsResponse;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactListQuery, ContactReader};

/// Shown when the backend rejects a fetch without explaining why.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch contacts";
/// Shown when the backend could not be reached or answered garbage.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// What the caller should do once a fetch has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Contacts and pagination were replaced.
    Loaded,
    /// An error message is now set.
    Failed,
    /// The backend answered 401; navigate to the login page.
    LoginRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    contacts: Vec<Contact>,
    pagination: PaginationInfo,
    loading: bool,
    initial_loading: bool,
    error: Option<String>,
    selected: Option<Contact>,
    edit_dialog_open: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// State before the first fetch: empty list, default pagination, both
    /// loading flags raised.
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            pagination: PaginationInfo::default(),
            loading: true,
            initial_loading: true,
            error: None,
            selected: None,
            edit_dialog_open: false,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_initial_loading(&self) -> bool {
        self.initial_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.selected.as_ref()
    }

    pub fn is_edit_dialog_open(&self) -> bool {
        self.edit_dialog_open
    }

    /// True when the backend reports no contacts at all.
    pub fn is_empty(&self) -> bool {
        self.pagination.total == 0
    }

    /// Raises the loading flag without touching anything else.
    pub fn mark_loading(&mut self) {
        self.loading = true;
    }

    /// Marks a fetch as in flight and returns the query to send.
    pub fn begin_fetch(&mut self, page: u32, limit: u32) -> ContactListQuery {
        self.mark_loading();
        ContactListQuery::new().paginate(page, limit)
    }

    /// Applies the backend's answer to a fetch started with [`Self::begin_fetch`].
    ///
    /// Both loading flags are cleared whatever the outcome. A 401 leaves
    /// contacts, pagination and error untouched. A success does not clear
    /// an earlier error message.
    pub fn settle_fetch(&mut self, result: RepositoryResult<ContactsResponse>) -> FetchOutcome {
        let outcome = match result {
            Ok(response) => {
                self.contacts = response.contacts;
                self.pagination = response.pagination;
                FetchOutcome::Loaded
            }
            Err(RepositoryError::Unauthorized) => {
                log::info!("Contacts fetch rejected as unauthenticated");
                FetchOutcome::LoginRequired
            }
            Err(RepositoryError::Api { status, message }) => {
                log::error!("Contacts fetch failed with status {status}: {message:?}");
                self.error = Some(
                    message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| FETCH_FAILED_MESSAGE.to_string()),
                );
                FetchOutcome::Failed
            }
            Err(err) => {
                log::error!("Contacts fetch failed: {err}");
                self.error = Some(NETWORK_ERROR_MESSAGE.to_string());
                FetchOutcome::Failed
            }
        };

        self.loading = false;
        self.initial_loading = false;
        outcome
    }

    /// Requests `page` with `limit` rows and applies the result.
    pub async fn fetch_contacts<R>(&mut self, repo: &R, page: u32, limit: u32) -> FetchOutcome
    where
        R: ContactReader,
    {
        let query = self.begin_fetch(page, limit);
        let result = repo.list_contacts(query).await;
        self.settle_fetch(result)
    }

    /// Initial load: page 1 with the default page size.
    pub async fn mount<R>(&mut self, repo: &R) -> FetchOutcome
    where
        R: ContactReader,
    {
        self.fetch_contacts(repo, 1, DEFAULT_PAGE_SIZE).await
    }

    /// Another page at the current page size.
    pub async fn change_page<R>(&mut self, repo: &R, page: u32) -> FetchOutcome
    where
        R: ContactReader,
    {
        let limit = self.pagination.limit;
        self.fetch_contacts(repo, page, limit).await
    }

    /// A new page size always returns to the first page.
    pub async fn change_page_size<R>(&mut self, repo: &R, page_size: PageSize) -> FetchOutcome
    where
        R: ContactReader,
    {
        self.fetch_contacts(repo, 1, page_size.get()).await
    }

    /// Row click: selects the contact and opens the edit dialog.
    ///
    /// Returns `false` when no contact on the current page has that id.
    pub fn select_contact(&mut self, contact_id: ContactId) -> bool {
        match self.contacts.iter().find(|c| c.id == contact_id) {
            Some(contact) => {
                self.selected = Some(contact.clone());
                self.edit_dialog_open = true;
                true
            }
            None => false,
        }
    }

    /// Replaces the entry with the same id as `updated`; nothing is re-fetched.
    pub fn contact_saved(&mut self, updated: Contact) {
        if let Some(selected) = self.selected.as_mut() {
            if selected.id == updated.id {
                *selected = updated.clone();
            }
        }
        for contact in self.contacts.iter_mut().filter(|c| c.id == updated.id) {
            *contact = updated.clone();
        }
    }

    /// Closes the edit dialog and clears the selection.
    pub fn close_dialog(&mut self) {
        self.edit_dialog_open = false;
        self.selected = None;
    }
}
