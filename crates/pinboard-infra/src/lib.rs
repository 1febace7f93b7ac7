//! # Pinboard Infrastructure
//!
//! Concrete implementations of the repository ports defined in `pinboard-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::{InMemoryContactRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
