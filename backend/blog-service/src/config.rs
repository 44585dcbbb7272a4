/// Configuration management for Blog Service
///
/// This module handles loading configuration from environment variables.
/// A `.env` file is read first (see `main.rs`), and every value falls back to
/// a development default so the service starts with no setup at all.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEV_SESSION_SECRET: &str = "dev-only-session-secret-change-me-0123456789";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session cookie configuration
    pub session: SessionConfig,
    /// Site layout and access settings
    pub site: SiteConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    pub secret: String,
    /// Session lifetime in hours
    pub ttl_hours: i64,
    /// Mark cookies `Secure` (HTTPS only)
    pub cookie_secure: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("ttl_hours", &self.ttl_hours)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Id of the only account allowed to manage posts and comments
    pub admin_user_id: i64,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("BLOG_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_default("BLOG_SERVICE_PORT", 8000)?,
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://blog.db?mode=rwc".to_string()),
                max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            session: {
                let secret = match std::env::var("SESSION_SECRET") {
                    Ok(value) => value,
                    Err(_) if production => {
                        return Err("SESSION_SECRET must be set in production".to_string())
                    }
                    Err(_) => DEV_SESSION_SECRET.to_string(),
                };

                if production && secret.len() < 32 {
                    return Err("SESSION_SECRET must be at least 32 bytes in production".to_string());
                }

                let ttl_hours: i64 = parse_env_or_default("SESSION_TTL_HOURS", 168)?;
                if ttl_hours <= 0 {
                    return Err("SESSION_TTL_HOURS must be positive".to_string());
                }

                SessionConfig {
                    secret,
                    ttl_hours,
                    cookie_secure: production
                        || parse_env_or_default("SESSION_COOKIE_SECURE", false)?,
                }
            },
            site: SiteConfig {
                admin_user_id: parse_env_or_default("ADMIN_USER_ID", 1)?,
                templates_dir: std::env::var("TEMPLATES_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_templates_dir()),
                static_dir: std::env::var("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| default_static_dir()),
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                env: "development".to_string(),
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: DEV_SESSION_SECRET.to_string(),
                ttl_hours: 168,
                cookie_secure: false,
            },
            site: SiteConfig {
                admin_user_id: 1,
                templates_dir: default_templates_dir(),
                static_dir: default_static_dir(),
            },
        }
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "BLOG_SERVICE_PORT",
            "SESSION_SECRET",
            "SESSION_TTL_HOURS",
            "SESSION_COOKIE_SECURE",
            "ADMIN_USER_ID",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_in_development() {
        clear_env();
        let config = Config::from_env().expect("development config should load");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.site.admin_user_id, 1);
        assert_eq!(config.session.ttl_hours, 168);
        assert!(!config.session.cookie_secure);
        assert!(!config.is_production());
    }

    #[test]
    #[serial]
    fn test_production_requires_session_secret() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        let result = Config::from_env();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_production_forces_secure_cookie() {
        clear_env();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("SESSION_SECRET", "a".repeat(48));
        let config = Config::from_env();
        clear_env();
        let config = config.expect("production config should load");
        assert!(config.session.cookie_secure);
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_rejected() {
        clear_env();
        std::env::set_var("BLOG_SERVICE_PORT", "eighty");
        let result = Config::from_env();
        clear_env();
        assert!(result.unwrap_err().contains("BLOG_SERVICE_PORT"));
    }

    #[test]
    fn test_session_secret_is_redacted_in_debug() {
        let config = Config::default();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains(DEV_SESSION_SECRET));
    }
}
