//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use scribe_infra::database::{DatabaseConfig, MemoryStore};

/// Shared application state: one repository handle per entity.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations:
    /// Postgres when configured and reachable, the in-memory store
    /// otherwise.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match scribe_infra::database::connect(config).await {
                    Ok(db) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(db);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Built without postgres support - using the in-memory store");
        }

        Self::in_memory()
    }

    #[cfg(feature = "postgres")]
    fn postgres(db: scribe_infra::database::DbConn) -> Self {
        use scribe_infra::database::{
            PostgresCategoryRepository, PostgresCommentRepository, PostgresLocationRepository,
            PostgresPostRepository, PostgresUserRepository,
        };

        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            locations: Arc::new(PostgresLocationRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db)),
        }
    }

    /// State backed entirely by the shared in-memory store.
    pub fn in_memory() -> Self {
        use scribe_infra::database::{
            InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryLocationRepository,
            InMemoryPostRepository, InMemoryUserRepository,
        };

        let store = Arc::new(MemoryStore::default());
        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            categories: Arc::new(InMemoryCategoryRepository::new(store.clone())),
            locations: Arc::new(InMemoryLocationRepository::new(store.clone())),
            posts: Arc::new(InMemoryPostRepository::new(store.clone())),
            comments: Arc::new(InMemoryCommentRepository::new(store)),
        }
    }
}
