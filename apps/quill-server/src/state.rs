//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use quill_core::{ListingConfig, PostService};
use quill_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use crate::config::AppConfig;

/// Which post store is serving requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub cookie_secure: bool,
    pub store: StoreKind,
}

impl AppState {
    /// Build the application state, falling back to memory without a database.
    pub async fn new(config: &AppConfig) -> Self {
        let (posts, users, store) = Self::open_store(config).await;
        tracing::info!(store = store.as_str(), "Application state initialized");

        Self::assemble(posts, users, store, config.listing, config.jwt.clone(), config.cookie_secure)
    }

    #[cfg(feature = "postgres")]
    async fn open_store(
        config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>, StoreKind) {
        use quill_infra::database::{PostgresPostRepository, PostgresUserRepository, connect};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::memory_store();
        };

        match connect(db_config).await {
            Ok(conn) => (
                Arc::new(PostgresPostRepository::new(conn.clone())),
                Arc::new(PostgresUserRepository::new(conn)),
                StoreKind::Postgres,
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::memory_store()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn open_store(
        _config: &AppConfig,
    ) -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>, StoreKind) {
        tracing::info!("Running without postgres feature - using in-memory store");
        Self::memory_store()
    }

    fn memory_store() -> (Arc<dyn PostRepository>, Arc<dyn UserRepository>, StoreKind) {
        let store = InMemoryStore::new();
        (
            Arc::new(store.posts()),
            Arc::new(store.users()),
            StoreKind::Memory,
        )
    }

    /// State over a fresh in-memory store.
    #[cfg(test)]
    pub fn in_memory(listing: ListingConfig, jwt: JwtConfig) -> Self {
        let (posts, users, store) = Self::memory_store();
        Self::assemble(posts, users, store, listing, jwt, false)
    }

    fn assemble(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        store: StoreKind,
        listing: ListingConfig,
        jwt: JwtConfig,
        cookie_secure: bool,
    ) -> Self {
        Self {
            posts: PostService::new(posts, users.clone(), listing),
            users,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
            cookie_secure,
            store,
        }
    }
}
