use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum number of characters a post title may hold.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum number of characters an author name may hold.
pub const AUTHOR_MAX_CHARS: usize = 50;

/// Post entity - a bulletin-board entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// The list projection of this post (everything except `content`).
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Post as it appears in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values checked against the `posts` table constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Raw, unchecked post values. `None` stands for SQL `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl PostDraft {
    /// Apply the column constraints: every column is NOT NULL, and
    /// `title`/`author` are bounded varchars.
    pub fn validate(self) -> Result<PostFields, DomainError> {
        let title = required("title", self.title)?;
        let content = required("content", self.content)?;
        let author = required("author", self.author)?;

        bounded("title", &title, TITLE_MAX_CHARS)?;
        bounded("author", &author, AUTHOR_MAX_CHARS)?;

        Ok(PostFields {
            title,
            content,
            author,
        })
    }
}

/// Partial update. The outer `Option` tells whether the key was sent at all;
/// the inner one carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<Option<String>>,
    pub content: Option<Option<String>>,
    pub author: Option<Option<String>>,
}

impl PostPatch {
    /// Merge the patch over the stored post. Keys that were not sent keep
    /// the stored value.
    pub fn apply_to(self, post: &Post) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_else(|| Some(post.title.clone())),
            content: self.content.unwrap_or_else(|| Some(post.content.clone())),
            author: self.author.unwrap_or_else(|| Some(post.author.clone())),
        }
    }
}

fn required(column: &'static str, value: Option<String>) -> Result<String, DomainError> {
    value.ok_or_else(|| DomainError::Constraint {
        column,
        reason: "null value violates not-null constraint".to_string(),
    })
}

fn bounded(column: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::Constraint {
            column,
            reason: format!("value too long ({len} > {max} characters)"),
        });
    }
    Ok(())
}
