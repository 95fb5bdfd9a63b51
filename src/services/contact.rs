use crate::domain::contact::{Contact, UpdateContact};
use crate::domain::types::ContactId;
use crate::domain::user::UserContext;
use crate::forms::contact::SaveContactForm;
use crate::repository::errors::RepositoryError;
use crate::repository::{ContactWriter, UserReader};
use crate::services::dashboard::Dashboard;
use crate::services::{ServiceError, ServiceResult};

/// Validates the edit dialog form, persists it and folds the result into the
/// dashboard.
///
/// On success the saved contact replaces its row and the dialog closes. On
/// failure the dashboard is left as it was so the dialog stays open.
pub async fn save_contact<R>(
    repo: &R,
    dashboard: &mut Dashboard,
    contact_id: ContactId,
    form: SaveContactForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter,
{
    let updates = UpdateContact::try_from(form).map_err(|err| {
        log::error!("Failed to validate contact form: {err}");
        ServiceError::Form(err.to_string())
    })?;

    let saved = repo
        .update_contact(contact_id, updates)
        .await
        .map_err(|err| {
            if !matches!(err, RepositoryError::Unauthorized) {
                log::error!("Failed to save contact {contact_id}: {err}");
            }
            ServiceError::from(err)
        })?;

    dashboard.contact_saved(saved.clone());
    dashboard.close_dialog();
    Ok(saved)
}

/// Loads the signed-in operator for the map's station marker.
///
/// Only a 401 is an error; any other failure just leaves the map without a
/// station.
pub async fn load_user<R>(repo: &R) -> ServiceResult<Option<UserContext>>
where
    R: UserReader,
{
    match repo.current_user().await {
        Ok(user) => Ok(Some(user)),
        Err(RepositoryError::Unauthorized) => Err(ServiceError::Unauthorized),
        Err(err) => {
            log::warn!("Failed to load user profile: {err}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::PaginationInfo;
    use crate::domain::types::UserId;
    use crate::dto::api::ContactsResponse;
    use crate::repository::mock::MockRepository;

    fn contact(id: i32, callsign: &str) -> Contact {
        Contact {
            id: ContactId::new(id).expect("valid contact id"),
            callsign: callsign.to_string(),
            frequency: 3.573,
            mode: "FT8".to_string(),
            band: "80m".to_string(),
            datetime: "2024-02-01T21:00:00Z".to_string(),
            rst_sent: None,
            rst_received: None,
            name: None,
            qth: None,
            grid_locator: None,
            notes: None,
            latitude: None,
            longitude: None,
            confirmed: None,
        }
    }

    fn dashboard_with(contacts: Vec<Contact>) -> Dashboard {
        let total = contacts.len() as u64;
        let mut dashboard = Dashboard::new();
        dashboard.settle_fetch(Ok(ContactsResponse {
            contacts,
            pagination: PaginationInfo {
                page: 1,
                limit: 20,
                total,
                pages: 1,
            },
        }));
        dashboard
    }

    fn form(callsign: &str, name: &str) -> SaveContactForm {
        SaveContactForm {
            callsign: callsign.to_string(),
            frequency: 3.573,
            mode: "FT8".to_string(),
            band: "80m".to_string(),
            datetime: "2024-02-01T21:00".to_string(),
            rst_sent: None,
            rst_received: None,
            name: Some(name.to_string()),
            qth: None,
            grid_locator: None,
            notes: None,
            latitude: None,
            longitude: None,
            confirmed: Some("on".to_string()),
        }
    }

    #[actix_web::test]
    async fn save_replaces_row_and_closes_dialog() {
        let mut repo = MockRepository::new();
        repo.expect_update_contact()
            .withf(|id, updates| {
                id.get() == 2 && updates.name.as_deref() == Some("Alice") && updates.confirmed
            })
            .times(1)
            .returning(|id, updates| {
                let mut saved = contact(id.get(), updates.callsign.as_str());
                saved.name = updates.name;
                saved.confirmed = Some(updates.confirmed);
                Ok(saved)
            });

        let mut dashboard = dashboard_with(vec![contact(1, "DL1ABC"), contact(2, "G4XYZ")]);
        let id = ContactId::new(2).unwrap();
        dashboard.select_contact(id);

        let saved = save_contact(&repo, &mut dashboard, id, form("g4xyz", "Alice"))
            .await
            .expect("save should succeed");

        assert_eq!(saved.name.as_deref(), Some("Alice"));
        assert_eq!(dashboard.contacts()[0], contact(1, "DL1ABC"));
        assert_eq!(dashboard.contacts()[1], saved);
        assert!(!dashboard.is_edit_dialog_open());
        assert_eq!(dashboard.selected_contact(), None);
    }

    #[actix_web::test]
    async fn invalid_form_never_reaches_backend() {
        let mut repo = MockRepository::new();
        repo.expect_update_contact().times(0);

        let mut dashboard = dashboard_with(vec![contact(1, "DL1ABC")]);
        let id = ContactId::new(1).unwrap();
        dashboard.select_contact(id);
        let before = dashboard.clone();

        let result = save_contact(&repo, &mut dashboard, id, form("DL1 ABC", "Bob")).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(dashboard, before);
    }

    #[actix_web::test]
    async fn backend_failure_keeps_dialog_open() {
        let mut repo = MockRepository::new();
        repo.expect_update_contact().times(1).returning(|_, _| {
            Err(RepositoryError::Api {
                status: 422,
                message: Some("Invalid band".to_string()),
            })
        });

        let mut dashboard = dashboard_with(vec![contact(1, "DL1ABC")]);
        let id = ContactId::new(1).unwrap();
        dashboard.select_contact(id);

        let result = save_contact(&repo, &mut dashboard, id, form("DL1ABC", "Bob")).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::Api { status: 422, .. }))
        ));
        assert!(dashboard.is_edit_dialog_open());
        assert_eq!(dashboard.contacts()[0], contact(1, "DL1ABC"));
    }

    #[actix_web::test]
    async fn unauthorized_save_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_update_contact()
            .times(1)
            .returning(|_, _| Err(RepositoryError::Unauthorized));

        let mut dashboard = dashboard_with(vec![contact(1, "DL1ABC")]);
        let id = ContactId::new(1).unwrap();

        let result = save_contact(&repo, &mut dashboard, id, form("DL1ABC", "Bob")).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn user_profile_failures_are_tolerated() {
        let mut repo = MockRepository::new();
        repo.expect_current_user()
            .times(1)
            .returning(|| Err(RepositoryError::Network("refused".to_string())));

        assert!(matches!(load_user(&repo).await, Ok(None)));
    }

    #[actix_web::test]
    async fn user_profile_unauthorized_is_an_error() {
        let mut repo = MockRepository::new();
        repo.expect_current_user()
            .times(1)
            .returning(|| Err(RepositoryError::Unauthorized));

        assert!(matches!(
            load_user(&repo).await,
            Err(ServiceError::Unauthorized)
        ));
    }

    #[actix_web::test]
    async fn user_profile_is_returned() {
        let mut repo = MockRepository::new();
        repo.expect_current_user().times(1).returning(|| {
            Ok(UserContext {
                id: UserId::new(1).unwrap(),
                callsign: "DL1ABC".to_string(),
                name: None,
                grid_locator: Some("JN58".to_string()),
                latitude: None,
                longitude: None,
            })
        });

        let user = load_user(&repo).await.unwrap().expect("user present");
        assert_eq!(user.callsign, "DL1ABC");
    }
}
