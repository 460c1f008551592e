//! Post model and repository operations
//!
//! Posts are append-only family updates. There is no update or delete.
//! Listing is newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{optional_text, required_text, select, ListQuery, Listable, RepoError, SortOrder};
use crate::store::DocumentStore;

/// A family update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique post ID (UUID v4)
    pub id: Uuid,

    /// Author, if known. Not enforced: the user may since have been removed.
    ///
    /// Kept as a plain string so records written by older clients with
    /// arbitrary author ids still load.
    pub user_id: Option<String>,

    /// Top-level category
    pub category: Option<String>,

    /// Subcategory within `category`
    pub subcategory: Option<String>,

    /// Trimmed, non-empty body text
    pub content: String,

    /// When the post was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a post
#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub user_id: Option<Uuid>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub content: String,
}

impl Listable for Post {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Post {
    /// Sort order used by [`Post::list`]
    pub const ORDER: SortOrder = SortOrder::NewestFirst;

    /// Creates a post
    ///
    /// # Errors
    ///
    /// Returns `RepoError::Validation` if the content is blank
    pub async fn create(store: &DocumentStore, data: CreatePost) -> Result<Self, RepoError> {
        let content = required_text("content", &data.content)?;

        let post = Post {
            id: Uuid::new_v4(),
            user_id: data.user_id.map(|id| id.to_string()),
            category: optional_text(data.category),
            subcategory: optional_text(data.subcategory),
            content,
            created_at: Utc::now(),
        };

        store
            .mutate(|doc| {
                doc.posts.push(post.clone());
                Ok::<_, RepoError>(())
            })
            .await?;

        debug!(post_id = %post.id, category = ?post.category, "Post created");
        Ok(post)
    }

    /// Lists posts matching the filter, newest first
    pub async fn list(store: &DocumentStore, query: &ListQuery) -> Vec<Self> {
        store
            .read(|doc| select(&doc.posts, query, Self::ORDER))
            .await
    }

    /// Returns the `limit` most recent posts
    pub async fn recent(store: &DocumentStore, limit: usize) -> Vec<Self> {
        let mut posts = Self::list(store, &ListQuery::all()).await;
        posts.truncate(limit);
        posts
    }
}
