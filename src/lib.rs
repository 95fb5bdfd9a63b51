#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::http::HttpRepository;
#[cfg(feature = "server")]
use crate::store::DashboardStore;

pub mod domain;
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod store;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Client for the logbook backend; handlers attach the caller's token per request.
    let repo = HttpRepository::new(
        &server_config.api_base_url,
        Duration::from_secs(server_config.api_timeout_secs),
        &server_config.auth_cookie,
        &server_config.profile_path,
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;

    // Shared by every worker so a session sees the same state whichever one serves it.
    let store = web::Data::new(DashboardStore::new(Duration::from_secs(
        server_config.session_ttl_secs,
    )));

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let cookie_domain = (server_config.domain != "localhost")
        .then(|| format!(".{}", server_config.domain));
    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving dashboard on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(cookie_domain.clone())
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(routes::configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(store.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
