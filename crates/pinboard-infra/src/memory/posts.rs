use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use pinboard_core::domain::{Post, PostFields, PostSummary};
use pinboard_core::error::RepoError;
use pinboard_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Post>,
    last_id: i64,
}

/// In-memory post table keyed by id, with a monotonically increasing sequence.
#[derive(Default)]
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<PostSummary>, RepoError> {
        let table = self.table.read().await;
        let mut posts: Vec<PostSummary> = table.rows.values().map(Post::summary).collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(posts)
    }

    async fn create(&self, fields: PostFields) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let post = Post {
            id: table.last_id,
            title: fields.title,
            content: fields.content,
            author: fields.author,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, "Post inserted (memory)");
        Ok(post)
    }

    async fn update(&self, id: i64, fields: PostFields) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let post = table.rows.get_mut(&id).ok_or(RepoError::NotFound)?;

        post.title = fields.title;
        post.content = fields.content;
        post.author = fields.author;
        post.updated_at = Utc::now();

        Ok(post.clone())
    }
}
