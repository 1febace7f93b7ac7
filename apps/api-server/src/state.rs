//! Application state - shared across all handlers.

use std::sync::Arc;

use pinboard_core::ports::{ContactRepository, PostRepository};
use pinboard_infra::{InMemoryContactRepository, InMemoryPostRepository};

use crate::config::{AppConfig, RoutePrefixes};
use crate::templates::Templates;

#[cfg(feature = "postgres")]
use pinboard_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use pinboard_infra::database::{PostgresContactRepository, PostgresPostRepository};

/// Which storage backend the repositories talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub templates: Arc<Templates>,
    pub prefixes: RoutePrefixes,
    pub storage: StorageBackend,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, tera::Error> {
        let templates = Arc::new(Templates::new()?);

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = config.database.as_ref() {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Ok(Self {
                            posts: Arc::new(PostgresPostRepository::new(connections.main.clone())),
                            contacts: Arc::new(PostgresContactRepository::new(connections.main)),
                            templates,
                            prefixes: config.prefixes.clone(),
                            storage: StorageBackend::Postgres,
                        });
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory repositories");

        tracing::info!("Application state initialized (memory)");
        Ok(Self::in_memory(templates, config.prefixes.clone()))
    }

    /// State backed by fresh in-memory repositories.
    pub fn in_memory(templates: Arc<Templates>, prefixes: RoutePrefixes) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            contacts: Arc::new(InMemoryContactRepository::new()),
            templates,
            prefixes,
            storage: StorageBackend::Memory,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::for_tests_at(RoutePrefixes::default())
    }

    #[cfg(test)]
    pub fn for_tests_at(prefixes: RoutePrefixes) -> Self {
        let templates = Templates::new().expect("templates compile");
        Self::in_memory(Arc::new(templates), prefixes)
    }
}
