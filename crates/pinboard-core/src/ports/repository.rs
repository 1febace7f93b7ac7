use async_trait::async_trait;

use crate::domain::{Contact, ContactFields, Post, PostFields, PostSummary};
use crate::error::RepoError;

/// Lookup and removal shared by every table keyed by a primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its primary key. Fails with `RepoError::NotFound`
    /// when no row was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// All posts, newest `created_at` first.
    async fn list_recent(&self) -> Result<Vec<PostSummary>, RepoError>;

    /// Insert a post; both timestamps are stamped by the repository.
    async fn create(&self, fields: PostFields) -> Result<Post, RepoError>;

    /// Overwrite title, content and author, and advance `updated_at`.
    async fn update(&self, id: i64, fields: PostFields) -> Result<Post, RepoError>;
}

/// Contact repository.
#[async_trait]
pub trait ContactRepository: BaseRepository<Contact, i64> {
    /// All contacts, highest id first.
    async fn list(&self) -> Result<Vec<Contact>, RepoError>;

    async fn create(&self, fields: ContactFields) -> Result<Contact, RepoError>;

    async fn update(&self, id: i64, fields: ContactFields) -> Result<Contact, RepoError>;
}
