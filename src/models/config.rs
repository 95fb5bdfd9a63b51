//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_api_timeout_secs() -> u64 {
    10
}

fn default_auth_cookie() -> String {
    "token".to_string()
}

fn default_login_url() -> String {
    "/login".to_string()
}

fn default_profile_path() -> String {
    "/api/auth/me".to_string()
}

fn default_session_ttl_secs() -> u64 {
    60 * 60 * 8
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Session cookie signing key; at least 64 bytes.
    pub secret: String,
    /// Base URL of the logbook backend, e.g. `http://localhost:3000`.
    pub api_base_url: String,
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
    /// Name of the browser cookie forwarded to the backend.
    #[serde(default = "default_auth_cookie")]
    pub auth_cookie: String,
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}
