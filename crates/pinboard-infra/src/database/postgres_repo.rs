//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect};

use pinboard_core::domain::{Contact, ContactFields, Post, PostFields, PostSummary};
use pinboard_core::error::RepoError;
use pinboard_core::ports::{ContactRepository, PostRepository};

use super::entity::contact::{self, Entity as ContactEntity};
use super::entity::post::{self, Entity as PostEntity, SummaryRow};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL contact repository.
pub type PostgresContactRepository = PostgresBaseRepository<ContactEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_recent(&self) -> Result<Vec<PostSummary>, RepoError> {
        let rows = PostEntity::find()
            .select_only()
            .columns([
                post::Column::Id,
                post::Column::Title,
                post::Column::Author,
                post::Column::CreatedAt,
                post::Column::UpdatedAt,
            ])
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, fields: PostFields) -> Result<Post, RepoError> {
        let now = Utc::now();
        let model = post::ActiveModel {
            id: NotSet,
            title: Set(fields.title),
            content: Set(fields.content),
            author: Set(fields.author),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await
        .map_err(repo_error)?;

        tracing::debug!(post_id = model.id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: i64, fields: PostFields) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Unchanged(id),
            title: Set(fields.title),
            content: Set(fields.content),
            author: Set(fields.author),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        }
        .update(&self.db)
        .await
        .map_err(repo_error)?;

        tracing::debug!(post_id = model.id, "Post updated");
        Ok(model.into())
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn list(&self) -> Result<Vec<Contact>, RepoError> {
        let rows = ContactEntity::find()
            .order_by_desc(contact::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, fields: ContactFields) -> Result<Contact, RepoError> {
        let model = contact::ActiveModel {
            id: NotSet,
            name: Set(fields.name),
            email: Set(fields.email),
            phone: Set(fields.phone),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(repo_error)?;

        tracing::debug!(contact_id = model.id, "Contact inserted");
        Ok(model.into())
    }

    async fn update(&self, id: i64, fields: ContactFields) -> Result<Contact, RepoError> {
        let model = contact::ActiveModel {
            id: Unchanged(id),
            name: Set(fields.name),
            email: Set(fields.email),
            phone: Set(fields.phone),
            created_at: NotSet,
        }
        .update(&self.db)
        .await
        .map_err(repo_error)?;

        tracing::debug!(contact_id = model.id, "Contact updated");
        Ok(model.into())
    }
}
