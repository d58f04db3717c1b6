//! Application state - shared across all handlers.

use std::sync::Arc;

use journal_core::PostService;
use journal_core::ports::PostRepository;
use journal_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use journal_infra::{DatabaseConnections, PostgresPostRepository};

/// Which datastore backs the post service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub storage: Storage,
}

impl AppState {
    /// Build the application state with the appropriate repository.
    ///
    /// The PostgreSQL pool is only described here; it connects on the first query.
    pub fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(config) = db_config {
            let connections = Arc::new(DatabaseConnections::new(config.clone()));
            tracing::info!(
                pool = config.max_connections,
                "PostgreSQL post repository configured (connects on first use)"
            );
            return Self::with_repository(
                Arc::new(PostgresPostRepository::new(connections)),
                Storage::Postgres,
            );
        }

        #[cfg(not(feature = "postgres"))]
        if db_config.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }

        tracing::warn!("DATABASE_URL not set. Running with the in-memory post store.");
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), Storage::Memory)
    }

    pub fn with_repository(repo: Arc<dyn PostRepository>, storage: Storage) -> Self {
        Self {
            posts: PostService::new(repo),
            storage,
        }
    }
}
