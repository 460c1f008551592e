//! Entity models and repository operations for FamilyHub
//!
//! Each model exposes its operations as associated async functions that take
//! the [`DocumentStore`](crate::store::DocumentStore). Reads run against the
//! last committed document; writes go through `DocumentStore::mutate`.
//!
//! # Models
//!
//! - `user`: Accounts, registration, approval gate, login
//! - `post`: Family updates (append-only)
//! - `task`: Shared to-do items
//! - `category`: Read-only category → subcategory mapping
//!
//! # Example
//!
//! ```
//! use familyhub_shared::models::{post::{CreatePost, Post}, ListQuery};
//! use familyhub_shared::store::DocumentStore;
//!
//! # async fn example() -> Result<(), familyhub_shared::models::RepoError> {
//! let store = DocumentStore::in_memory();
//!
//! Post::create(&store, CreatePost {
//!     user_id: None,
//!     category: Some("life".to_string()),
//!     subcategory: None,
//!     content: "Hello family".to_string(),
//! })
//! .await?;
//!
//! let posts = Post::list(&store, &ListQuery::category("life")).await;
//! assert_eq!(posts.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod post;
pub mod task;
pub mod user;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::auth::{jwt::JwtError, password::PasswordError};
use crate::store::StoreError;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Input is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// A unique field already exists
    #[error("{0}")]
    Conflict(String),

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account exists but has not been approved yet
    #[error("Account pending approval")]
    PendingApproval,

    /// Id lookup missed
    #[error("{0}")]
    NotFound(String),

    /// Persisting the document failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Password hashing or verification failed
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Credential signing failed
    #[error("Credential error: {0}")]
    Credential(#[from] JwtError),
}

/// Category/subcategory filter for list queries
///
/// An absent or empty value matches everything. A present value matches by
/// exact equality, so records without a category never match a category
/// filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    /// Required category, if any
    pub category: Option<String>,

    /// Required subcategory, if any
    pub subcategory: Option<String>,
}

impl ListQuery {
    /// Matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches records in one category
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            subcategory: None,
        }
    }

    /// Narrows the filter to a subcategory
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Whether a record with the given classification passes the filter
    pub fn matches(&self, category: Option<&str>, subcategory: Option<&str>) -> bool {
        fn passes(wanted: &Option<String>, actual: Option<&str>) -> bool {
            match wanted.as_deref() {
                None | Some("") => true,
                Some(wanted) => actual == Some(wanted),
            }
        }

        passes(&self.category, category) && passes(&self.subcategory, subcategory)
    }
}

/// Ordering of a list result by creation time
///
/// Sorting is stable: records with equal timestamps keep insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending `createdAt` (tasks)
    OldestFirst,

    /// Descending `createdAt` (posts)
    NewestFirst,
}

/// A record that can be filtered by classification and ordered by age
pub trait Listable: Clone {
    /// Category, if any
    fn category(&self) -> Option<&str>;

    /// Subcategory, if any
    fn subcategory(&self) -> Option<&str>;

    /// Creation timestamp (sort key)
    fn created_at(&self) -> DateTime<Utc>;
}

/// Filters and orders a collection
pub fn select<T: Listable>(items: &[T], query: &ListQuery, order: SortOrder) -> Vec<T> {
    let mut selected: Vec<T> = items
        .iter()
        .filter(|item| query.matches(item.category(), item.subcategory()))
        .cloned()
        .collect();

    match order {
        SortOrder::OldestFirst => selected.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
        SortOrder::NewestFirst => selected.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
    }

    selected
}

/// Trims a required text field, rejecting blank values
pub(crate) fn required_text(field: &str, value: &str) -> Result<String, RepoError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepoError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Normalizes an optional classification: blank becomes `None`
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
