use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};
use uuid::Uuid;

use crate::models::config::ServerConfig;

pub mod dashboard;
pub mod main;

const DASHBOARD_SESSION_KEY: &str = "dashboard_id";

/// Registers every page and action of the dashboard.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::index)
        .service(dashboard::show_dashboard)
        .service(dashboard::show_current)
        .service(dashboard::change_page)
        .service(dashboard::change_page_size)
        .service(dashboard::select_contact)
        .service(dashboard::save_contact)
        .service(dashboard::close_dialog);
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: flash alerts and the active nav entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Id under which this browser session's dashboard is stored, created on
/// first use.
pub fn dashboard_session_id(session: &Session) -> Result<Uuid, actix_web::Error> {
    if let Some(id) = session.get::<Uuid>(DASHBOARD_SESSION_KEY)? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(DASHBOARD_SESSION_KEY, id)?;
    Ok(id)
}

/// Backend credentials carried by the browser, if any.
pub fn auth_token(req: &HttpRequest, config: &ServerConfig) -> Option<String> {
    req.cookie(&config.auth_cookie)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;

    fn config() -> ServerConfig {
        ServerConfig {
            domain: "localhost".to_string(),
            address: "127.0.0.1".to_string(),
            port: 8080,
            templates_dir: "templates/**/*".to_string(),
            secret: "s".repeat(64),
            api_base_url: "http://localhost:3000".to_string(),
            api_timeout_secs: 10,
            auth_cookie: "session_token".to_string(),
            login_url: "/login".to_string(),
            profile_path: "/api/auth/me".to_string(),
            session_ttl_secs: 60,
        }
    }

    #[test]
    fn flash_levels_map_to_bootstrap_alerts() {
        let levels = [
            (Level::Error, "danger"),
            (Level::Warning, "warning"),
            (Level::Success, "success"),
            (Level::Info, "info"),
            (Level::Debug, "info"),
        ];
        for (level, class) in levels {
            assert_eq!(alert_level_to_str(&level), class, "{level:?}");
        }
    }

    #[test]
    fn redirect_is_see_other() {
        let response = redirect("/dashboard/current");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard/current"
        );
    }

    #[test]
    fn auth_token_reads_configured_cookie() {
        let config = config();

        let req = TestRequest::default()
            .cookie(Cookie::new("session_token", "abc123"))
            .cookie(Cookie::new("token", "ignored"))
            .to_http_request();
        assert_eq!(auth_token(&req, &config).as_deref(), Some("abc123"));

        let blank = TestRequest::default()
            .cookie(Cookie::new("session_token", ""))
            .to_http_request();
        assert_eq!(auth_token(&blank, &config), None);

        let missing = TestRequest::default().to_http_request();
        assert_eq!(auth_token(&missing, &config), None);
    }
}
