//! Server configuration from the environment

use anyhow::Context;
use auth::AuthConfig;
use axum::http::{HeaderValue, Method, header};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Account created at startup if missing
#[derive(Clone)]
pub struct BootstrapUser {
    pub user_name: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapUser")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// `None` runs on the in-memory store
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub frontend_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
    pub bootstrap_user: Option<BootstrapUser>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value source; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let frontend_origins: Vec<HeaderValue> = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let mut auth = if cfg!(debug_assertions) {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };
        if let Some(secs) = get("AUTH_TOKEN_TTL_SECS") {
            let secs: u64 = secs
                .parse()
                .context("AUTH_TOKEN_TTL_SECS must be a number of seconds")?;
            auth = auth.with_token_ttl(Duration::from_secs(secs));
        }
        if let Some(pepper) = get("AUTH_PASSWORD_PEPPER") {
            auth = auth.with_pepper(pepper.into_bytes());
        }

        let bootstrap_user = match (get("BOOTSTRAP_USERNAME"), get("BOOTSTRAP_PASSWORD")) {
            (Some(user_name), Some(password)) => Some(BootstrapUser {
                user_name,
                password,
            }),
            (Some(_), None) | (None, Some(_)) => {
                tracing::warn!("Only one of BOOTSTRAP_USERNAME/BOOTSTRAP_PASSWORD set, ignoring");
                None
            }
            (None, None) => None,
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            db_max_connections,
            frontend_origins,
            auth,
            bootstrap_user,
        })
    }

    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.frontend_origins.clone())
            .allow_methods(AllowMethods::list([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::list([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ]))
            .allow_credentials(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.db_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(config.database_url.is_none());
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(config.bootstrap_user.is_none());
        assert!(config.auth.pepper().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/app"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("AUTH_TOKEN_TTL_SECS", "60"),
            ("AUTH_PASSWORD_PEPPER", "pepper"),
            ("BOOTSTRAP_USERNAME", "admin"),
            ("BOOTSTRAP_PASSWORD", "correct-horse-battery"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/app"));
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(60));
        assert_eq!(config.auth.pepper(), Some(&b"pepper"[..]));
        assert_eq!(config.bootstrap_user.unwrap().user_name, "admin");
    }

    #[test]
    fn test_empty_database_url_means_memory() {
        let config = config(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(config(&[("DB_MAX_CONNECTIONS", "-1")]).is_err());
        assert!(config(&[("AUTH_TOKEN_TTL_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_half_bootstrap_is_ignored() {
        let config = config(&[("BOOTSTRAP_USERNAME", "admin")]).unwrap();
        assert!(config.bootstrap_user.is_none());
    }

    #[test]
    fn test_bootstrap_password_is_redacted() {
        let config = config(&[
            ("BOOTSTRAP_USERNAME", "admin"),
            ("BOOTSTRAP_PASSWORD", "correct-horse-battery"),
        ])
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("correct-horse-battery"));
    }
}
