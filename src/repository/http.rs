//! reqwest-backed implementation of the repository traits.

use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::contact::{Contact, UpdateContact};
use crate::domain::types::ContactId;
use crate::domain::user::UserContext;
use crate::dto::api::{ApiErrorBody, ContactEnvelope, ContactsResponse, UserEnvelope};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, UserReader};

/// HTTP client for the logbook backend.
///
/// One instance is shared by the whole server; [`HttpRepository::with_token`]
/// derives a per-request copy carrying the browser's auth cookie. Cloning is
/// cheap because [`reqwest::Client`] is reference counted.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
    auth_cookie: String,
    profile_path: String,
    token: Option<String>,
}

impl HttpRepository {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        auth_cookie: &str,
        profile_path: &str,
    ) -> RepositoryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_cookie: auth_cookie.to_string(),
            profile_path: profile_path.to_string(),
            token: None,
        })
    }

    /// Returns a copy that forwards `token` as the backend auth cookie.
    #[must_use]
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.header(COOKIE, format!("{}={token}", self.auth_cookie)),
            None => builder,
        }
    }
}

/// Maps a backend status and body to a typed result.
///
/// `401` is checked before the body is looked at. Error bodies must be JSON;
/// anything unreadable becomes [`RepositoryError::Decode`].
pub fn interpret_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> RepositoryResult<T> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(RepositoryError::Unauthorized);
    }

    if status.is_success() {
        return serde_json::from_slice(body).map_err(RepositoryError::from);
    }

    let error_body: ApiErrorBody = serde_json::from_slice(body)?;
    Err(RepositoryError::Api {
        status: status.as_u16(),
        message: error_body.error,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(RepositoryError::Unauthorized);
    }
    let body = response.bytes().await?;
    interpret_response(status, &body)
}

impl ContactReader for HttpRepository {
    async fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<ContactsResponse> {
        let response = self
            .request(Method::GET, "/api/contacts")
            .query(&[("page", query.page), ("limit", query.limit)])
            .send()
            .await?;
        read_json(response).await
    }
}

impl ContactWriter for HttpRepository {
    async fn update_contact(
        &self,
        contact_id: ContactId,
        updates: UpdateContact,
    ) -> RepositoryResult<Contact> {
        let response = self
            .request(Method::PUT, &format!("/api/contacts/{contact_id}"))
            .json(&updates)
            .send()
            .await?;
        read_json::<ContactEnvelope>(response).await.map(Contact::from)
    }
}

impl UserReader for HttpRepository {
    async fn current_user(&self) -> RepositoryResult<UserContext> {
        let response = self.request(Method::GET, &self.profile_path).send().await?;
        read_json::<UserEnvelope>(response)
            .await
            .map(UserContext::from)
    }
}
