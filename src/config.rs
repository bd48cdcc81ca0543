//! Runtime configuration, read once from the environment at startup.

use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://partstock.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Sea-ORM connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Listen address for the HTTP server (`PARTSTOCK_BIND`).
    pub bind_addr: String,
    /// Directory where uploaded images land (`PARTSTOCK_UPLOAD_DIR`).
    pub upload_dir: String,
    /// Optional bearer token (`PARTSTOCK_API_TOKEN`). When unset, write
    /// endpoints are open; set it to require `Authorization: Bearer <token>`
    /// on every non-read request.
    pub api_token: Option<String>,
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// development defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("PARTSTOCK_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            upload_dir: env::var("PARTSTOCK_UPLOAD_DIR")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            api_token: env::var("PARTSTOCK_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("PARTSTOCK_BIND");
            env::remove_var("PARTSTOCK_UPLOAD_DIR");
            env::remove_var("PARTSTOCK_API_TOKEN");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_is_empty() {
        clear_env();
        let config = AppConfig::from_env();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.upload_dir, DEFAULT_UPLOAD_DIR);
        assert!(config.api_token.is_none());
    }

    #[test]
    #[serial]
    fn test_env_overrides_are_picked_up() {
        clear_env();
        unsafe {
            env::set_var("DATABASE_URL", "postgres://inventory@db/partstock");
            env::set_var("PARTSTOCK_BIND", "0.0.0.0:8080");
            env::set_var("PARTSTOCK_UPLOAD_DIR", "/srv/partstock/uploads");
            env::set_var("PARTSTOCK_API_TOKEN", "s3cret");
        }
        let config = AppConfig::from_env();
        assert_eq!(config.database_url, "postgres://inventory@db/partstock");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.upload_dir, "/srv/partstock/uploads");
        assert_eq!(config.api_token.as_deref(), Some("s3cret"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_token_counts_as_unset() {
        clear_env();
        unsafe {
            env::set_var("PARTSTOCK_API_TOKEN", "   ");
        }
        let config = AppConfig::from_env();
        assert!(config.api_token.is_none());
        clear_env();
    }
}
