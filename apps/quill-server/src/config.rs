//! Application configuration loaded from environment variables.

use std::env;

use quill_core::ListingConfig;
use quill_infra::JwtConfig;
use quill_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the blog on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub listing: ListingConfig,
    pub jwt: JwtConfig,
    /// Mark the session cookie `Secure`; enable behind HTTPS.
    pub cookie_secure: bool,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parsed("DB_MAX_CONNECTIONS").unwrap_or(config.max_connections);
            config.min_connections = parsed("DB_MIN_CONNECTIONS").unwrap_or(config.min_connections);
            config
        });

        let mut listing = ListingConfig::default();
        listing.per_page = parsed::<u64>("POSTS_PER_PAGE")
            .filter(|n| *n > 0)
            .unwrap_or(listing.per_page);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database,
            listing,
            jwt: JwtConfig::from_env(),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
