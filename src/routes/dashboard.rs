use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use uuid::Uuid;
use validator::Validate;

use crate::domain::types::{ContactId, PageSize};
use crate::dto::dashboard::DashboardView;
use crate::forms::contact::SaveContactForm;
use crate::forms::dashboard::{PageForm, PageSizeForm};
use crate::models::config::ServerConfig;
use crate::repository::http::HttpRepository;
use crate::routes::{auth_token, base_context, dashboard_session_id, redirect, render_template};
use crate::services::ServiceError;
use crate::services::contact as contact_service;
use crate::services::dashboard::FetchOutcome;
use crate::store::{DashboardSession, DashboardStore};

const CURRENT_URL: &str = "/dashboard/current";
const DASHBOARD_URL: &str = "/dashboard";

fn render_dashboard(
    tera: &Tera,
    state: &DashboardSession,
    flash_messages: &IncomingFlashMessages,
) -> HttpResponse {
    let view = DashboardView::new(&state.dashboard, state.user.as_ref());
    let mut context = base_context(flash_messages, "dashboard");
    context.insert("view", &view);

    let template = if view.initial_loading {
        "dashboard/loading.html"
    } else {
        "dashboard/index.html"
    };
    render_template(tera, template, &context)
}

fn session_id_or_error(session: &Session) -> Result<Uuid, HttpResponse> {
    dashboard_session_id(session).map_err(|err| {
        log::error!("Failed to access dashboard session: {err}");
        HttpResponse::InternalServerError().finish()
    })
}

/// Opens the dashboard: fresh state, first page at the default size.
#[get("/dashboard")]
pub async fn show_dashboard(
    req: HttpRequest,
    session: Session,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<HttpRepository>,
    store: web::Data<DashboardStore>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let id = match session_id_or_error(&session) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let repo = repo.with_token(auth_token(&req, &server_config));

    // A fresh session starts out loading; publish it before the backend call.
    let mut state = DashboardSession::default();
    store.save(id, state.clone());
    let outcome = state.dashboard.mount(&repo).await;
    store.save(id, state.clone());
    if outcome == FetchOutcome::LoginRequired {
        return redirect(&server_config.login_url);
    }

    match contact_service::load_user(&repo).await {
        Ok(user) => state.user = user,
        Err(ServiceError::Unauthorized) => return redirect(&server_config.login_url),
        Err(err) => log::warn!("Dashboard rendered without station: {err}"),
    }
    store.save(id, state.clone());

    render_dashboard(&tera, &state, &flash_messages)
}

/// Renders whatever state the session currently holds.
#[get("/dashboard/current")]
pub async fn show_current(
    session: Session,
    flash_messages: IncomingFlashMessages,
    store: web::Data<DashboardStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let id = match session_id_or_error(&session) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match store.load(id) {
        Some(state) => render_dashboard(&tera, &state, &flash_messages),
        None => redirect(DASHBOARD_URL),
    }
}

#[post("/dashboard/page")]
pub async fn change_page(
    req: HttpRequest,
    session: Session,
    web::Form(form): web::Form<PageForm>,
    repo: web::Data<HttpRepository>,
    store: web::Data<DashboardStore>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Err(err) = form.validate() {
        log::error!("Invalid page requested: {err}");
        FlashMessage::error("Invalid page.").send();
        return redirect(CURRENT_URL);
    }
    let id = match session_id_or_error(&session) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(mut state) = store.load(id) else {
        return redirect(DASHBOARD_URL);
    };

    let repo = repo.with_token(auth_token(&req, &server_config));
    store.mark_loading(id);
    let outcome = state.dashboard.change_page(&repo, form.page).await;
    store.save(id, state);
    match outcome {
        FetchOutcome::LoginRequired => redirect(&server_config.login_url),
        _ => redirect(CURRENT_URL),
    }
}

#[post("/dashboard/page-size")]
pub async fn change_page_size(
    req: HttpRequest,
    session: Session,
    web::Form(form): web::Form<PageSizeForm>,
    repo: web::Data<HttpRepository>,
    store: web::Data<DashboardStore>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let page_size = match PageSize::try_from(form) {
        Ok(page_size) => page_size,
        Err(err) => {
            log::error!("Invalid page size requested: {err}");
            FlashMessage::error("Unsupported page size.").send();
            return redirect(CURRENT_URL);
        }
    };
    let id = match session_id_or_error(&session) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(mut state) = store.load(id) else {
        return redirect(DASHBOARD_URL);
    };

    let repo = repo.with_token(auth_token(&req, &server_config));
    store.mark_loading(id);
    let outcome = state.dashboard.change_page_size(&repo, page_size).await;
    store.save(id, state);
    match outcome {
        FetchOutcome::LoginRequired => redirect(&server_config.login_url),
        _ => redirect(CURRENT_URL),
    }
}

#[post("/dashboard/contacts/{contact_id}/select")]
pub async fn select_contact(
    contact_id: web::Path<i32>,
    session: Session,
    store: web::Data<DashboardStore>,
) -> impl Responder {
    let Ok(contact_id) = ContactId::new(contact_id.into_inner()) else {
        FlashMessage::error("Contact not found.").send();
        return redirect(CURRENT_URL);
    };
    let id = match session_id_or_error(&session) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(mut state) = store.load(id) else {
        return redirect(DASHBOARD_URL);
    };

    if state.dashboard.select_contact(contact_id) {
        store.save(id, state);
    } else {
        FlashMessage::error("Contact not found.").send();
    }
    redirect(CURRENT_URL)
}

#[post("/dashboard/contacts/{contact_id}")]
pub async fn save_contact(
    req: HttpRequest,
    contact_id: web::Path<i32>,
    session: Session,
    web::Form(form): web::Form<SaveContactForm>,
    repo: web::Data<HttpRepository>,
    store: web::Data<DashboardStore>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(contact_id) = ContactId::new(contact_id.into_inner()) else {
        FlashMessage::error("Contact not found.").send();
        return redirect(CURRENT_URL);
    };
    let id = match session_id_or_error(&session) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Some(mut state) = store.load(id) else {
        return redirect(DASHBOARD_URL);
    };

    let repo = repo.with_token(auth_token(&req, &server_config));
    match contact_service::save_contact(&repo, &mut state.dashboard, contact_id, form).await {
        Ok(saved) => {
            store.save(id, state);
            FlashMessage::success(format!("Contact {} updated.", saved.callsign)).send();
        }
        Err(ServiceError::Unauthorized) => return redirect(&server_config.login_url),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("Invalid contact: {message}")).send();
        }
        Err(_) => {
            FlashMessage::error("Failed to save contact.").send();
        }
    }
    redirect(CURRENT_URL)
}

#[post("/dashboard/dialog/close")]
pub async fn close_dialog(session: Session, store: web::Data<DashboardStore>) -> impl Responder {
    let id = match session_id_or_error(&session) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if let Some(mut state) = store.load(id) {
        state.dashboard.close_dialog();
        store.save(id, state);
    }
    redirect(CURRENT_URL)
}
