#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::dev::{ServerHandle, ServiceResponse};
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use logbook_dashboard::models::config::ServerConfig;
use logbook_dashboard::repository::http::HttpRepository;
use serde::Deserialize;
use serde_json::{Value, json};
use tera::Tera;

pub const VALID_TOKEN: &str = "valid";
pub const FAILING_TOKEN: &str = "failing";
pub const HTML_TOKEN: &str = "html";

/// Builds an app wired like production, talking to `$backend`.
#[allow(unused_macros)]
macro_rules! dashboard_app {
    ($backend:expr, $store:expr) => {{
        let key = actix_web::cookie::Key::from(&[7u8; 64]);
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_web_flash_messages::FlashMessagesFramework::builder(
                        actix_web_flash_messages::storage::CookieMessageStore::builder(
                            key.clone(),
                        )
                        .build(),
                    )
                    .build(),
                )
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        key.clone(),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(actix_web::web::Data::new(common::repository(
                    &$backend.base_url,
                )))
                .app_data($store.clone())
                .app_data(actix_web::web::Data::new(common::server_config(
                    &$backend.base_url,
                )))
                .app_data(actix_web::web::Data::new(common::templates()))
                .configure(logbook_dashboard::routes::configure),
        )
        .await
    }};
}

struct BackendState {
    total: u32,
    requests: Mutex<Vec<(u32, u32)>>,
}

/// In-process stand-in for the logbook backend.
pub struct FakeBackend {
    pub base_url: String,
    state: web::Data<BackendState>,
    handle: ServerHandle,
}

impl FakeBackend {
    /// `(page, limit)` of every authorized contacts listing, oldest first.
    pub fn requests(&self) -> Vec<(u32, u32)> {
        self.state.requests.lock().unwrap().clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

#[derive(Deserialize)]
struct ListParams {
    page: u32,
    limit: u32,
}

pub fn sample_contact(id: u32) -> Value {
    let mut contact = json!({
        "id": id,
        "callsign": format!("TEST{id}"),
        "frequency": 14.074,
        "mode": "FT8",
        "band": "20m",
        "datetime": "2024-01-05T14:30:00Z",
        "rst_sent": "59",
        "rst_received": "57"
    });
    if id % 2 == 0 {
        contact["grid_locator"] = json!("JN58");
    }
    contact
}

fn reject(req: &HttpRequest) -> Option<HttpResponse> {
    let token = req.cookie("token").map(|c| c.value().to_string());
    match token.as_deref() {
        Some(VALID_TOKEN) => None,
        Some(FAILING_TOKEN) => Some(
            HttpResponse::InternalServerError().json(json!({ "error": "Database unavailable" })),
        ),
        Some(HTML_TOKEN) => Some(
            HttpResponse::BadGateway()
                .content_type("text/html")
                .body("<html><body>Bad gateway</body></html>"),
        ),
        _ => Some(HttpResponse::Unauthorized().json(json!({ "error": "Unauthorized" }))),
    }
}

async fn list_contacts(
    req: HttpRequest,
    params: web::Query<ListParams>,
    state: web::Data<BackendState>,
) -> HttpResponse {
    if let Some(response) = reject(&req) {
        return response;
    }
    state
        .requests
        .lock()
        .unwrap()
        .push((params.page, params.limit));

    let limit = params.limit.max(1);
    let pages = state.total.div_ceil(limit);
    let start = params.page.saturating_sub(1) * limit;
    let end = (start + limit).min(state.total);
    let contacts = (start + 1..=end).map(sample_contact).collect::<Vec<_>>();

    HttpResponse::Ok().json(json!({
        "contacts": contacts,
        "pagination": {
            "page": params.page,
            "limit": limit,
            "total": state.total,
            "pages": pages
        }
    }))
}

async fn update_contact(
    req: HttpRequest,
    contact_id: web::Path<u32>,
    body: web::Json<Value>,
) -> HttpResponse {
    if let Some(response) = reject(&req) {
        return response;
    }
    let mut contact = body.into_inner();
    contact["id"] = json!(contact_id.into_inner());
    HttpResponse::Ok().json(json!({ "contact": contact }))
}

async fn current_user(req: HttpRequest) -> HttpResponse {
    if let Some(response) = reject(&req) {
        return response;
    }
    HttpResponse::Ok().json(json!({
        "user": { "id": 7, "callsign": "G4XYZ", "grid_locator": "IO91" }
    }))
}

/// Starts a backend holding `total` contacts on an ephemeral port.
///
/// Must be called from within an actix runtime.
pub fn start_backend(total: u32) -> FakeBackend {
    let state = web::Data::new(BackendState {
        total,
        requests: Mutex::new(Vec::new()),
    });
    let app_state = state.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/api/contacts", web::get().to(list_contacts))
            .route("/api/contacts/{id}", web::put().to(update_contact))
            .route("/api/auth/me", web::get().to(current_user))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind fake backend");

    let address = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    FakeBackend {
        base_url: format!("http://{address}"),
        state,
        handle,
    }
}

pub fn repository(base_url: &str) -> HttpRepository {
    HttpRepository::new(base_url, Duration::from_secs(5), "token", "/api/auth/me")
        .expect("build repository")
}

pub fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        templates_dir: "templates/**/*".to_string(),
        secret: "x".repeat(64),
        api_base_url: base_url.to_string(),
        api_timeout_secs: 5,
        auth_cookie: "token".to_string(),
        login_url: "/login".to_string(),
        profile_path: "/api/auth/me".to_string(),
        session_ttl_secs: 3600,
    }
}

pub fn templates() -> Tera {
    Tera::new("templates/**/*").expect("templates parse")
}

/// Minimal browser cookie jar for multi-request flows.
#[derive(Default)]
pub struct CookieJar(HashMap<String, Cookie<'static>>);

impl CookieJar {
    pub fn with_token(token: &str) -> Self {
        let mut jar = Self::default();
        jar.0
            .insert("token".to_string(), Cookie::new("token", token.to_string()));
        jar
    }

    pub fn remove(&mut self, name: &str) {
        self.0.remove(name);
    }

    /// Stores cookies set by `response`; blank values delete.
    pub fn absorb<B>(&mut self, response: &ServiceResponse<B>) {
        for cookie in response.response().cookies() {
            if cookie.value().is_empty() {
                self.0.remove(cookie.name());
            } else {
                self.0
                    .insert(cookie.name().to_string(), cookie.into_owned());
            }
        }
    }

    pub fn apply(&self, mut request: TestRequest) -> TestRequest {
        for cookie in self.0.values() {
            request = request.cookie(cookie.clone());
        }
        request
    }
}

pub fn location<B>(response: &ServiceResponse<B>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
