//! Task model and repository operations
//!
//! Tasks are shared to-do items. Unlike posts they can be edited (title,
//! completion) and deleted. Listing is oldest-first so the list reads as a
//! sense of progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{optional_text, required_text, select, ListQuery, Listable, RepoError, SortOrder};
use crate::store::DocumentStore;

/// A shared to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Trimmed, non-empty title
    pub title: String,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Top-level category
    pub category: Option<String>,

    /// Subcategory within `category`
    pub subcategory: Option<String>,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub title: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Partial update for a task
///
/// Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    /// New title (must not be blank)
    pub title: Option<String>,

    /// New completion state
    pub completed: Option<bool>,
}

impl Listable for Task {
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

fn not_found() -> RepoError {
    RepoError::NotFound("Task not found".to_string())
}

impl Task {
    /// Sort order used by [`Task::list`]
    pub const ORDER: SortOrder = SortOrder::OldestFirst;

    /// Creates an incomplete task
    ///
    /// # Errors
    ///
    /// Returns `RepoError::Validation` if the title is blank
    pub async fn create(store: &DocumentStore, data: CreateTask) -> Result<Self, RepoError> {
        let title = required_text("title", &data.title)?;

        let task = Task {
            id: Uuid::new_v4(),
            title,
            completed: false,
            category: optional_text(data.category),
            subcategory: optional_text(data.subcategory),
            created_at: Utc::now(),
        };

        store
            .mutate(|doc| {
                doc.tasks.push(task.clone());
                Ok::<_, RepoError>(())
            })
            .await?;

        debug!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// Lists tasks matching the filter, oldest first
    pub async fn list(store: &DocumentStore, query: &ListQuery) -> Vec<Self> {
        store
            .read(|doc| select(&doc.tasks, query, Self::ORDER))
            .await
    }

    /// Finds a task by ID
    pub async fn find_by_id(store: &DocumentStore, id: Uuid) -> Option<Self> {
        store
            .read(|doc| doc.tasks.iter().find(|t| t.id == id).cloned())
            .await
    }

    /// Applies a partial update
    ///
    /// Setting `completed` to its current value is a no-op, so repeating an
    /// update yields the same final state.
    ///
    /// # Errors
    ///
    /// - `RepoError::NotFound` if no task has this ID
    /// - `RepoError::Validation` if a title is supplied but blank
    pub async fn update(store: &DocumentStore, id: Uuid, data: UpdateTask) -> Result<Self, RepoError> {
        let title = data
            .title
            .as_deref()
            .map(|t| required_text("title", t))
            .transpose();

        let task = store
            .mutate(|doc| {
                let task = doc.tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;

                if let Some(title) = title? {
                    task.title = title;
                }
                if let Some(completed) = data.completed {
                    task.completed = completed;
                }

                Ok::<_, RepoError>(task.clone())
            })
            .await?;

        debug!(task_id = %id, completed = task.completed, "Task updated");
        Ok(task)
    }

    /// Deletes a task and returns it
    ///
    /// # Errors
    ///
    /// Returns `RepoError::NotFound` if no task has this ID; the collection
    /// is left unchanged.
    pub async fn delete(store: &DocumentStore, id: Uuid) -> Result<Self, RepoError> {
        let removed = store
            .mutate(|doc| {
                let index = doc.tasks.iter().position(|t| t.id == id).ok_or_else(not_found)?;
                Ok::<_, RepoError>(doc.tasks.remove(index))
            })
            .await?;

        debug!(task_id = %id, "Task deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, MemoryStorage};
    use chrono::TimeZone;
    use std::sync::Arc;

    async fn create(store: &DocumentStore, title: &str) -> Task {
        Task::create(
            store,
            CreateTask {
                title: title.to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_defaults_incomplete() {
        let store = DocumentStore::in_memory();
        let task = create(&store, "  Buy milk ").await;

        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let store = DocumentStore::in_memory();
        let result = Task::create(&store, CreateTask::default()).await;
        assert!(matches!(result, Err(RepoError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_oldest_first() {
        let at = |title: &str, secs: i64| Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            completed: false,
            category: None,
            subcategory: None,
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        };
        let store = DocumentStore::new(MemoryStorage::with_document(Document {
            tasks: vec![at("t2", 200), at("t3", 300), at("t1", 100)],
            ..Default::default()
        }));

        let titles: Vec<String> = Task::list(&store, &ListQuery::all())
            .await
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["t1", "t2", "t3"]);
    }

    #[tokio::test]
    async fn test_update_completed_is_idempotent() {
        let store = DocumentStore::in_memory();
        let task = create(&store, "Laundry").await;

        let done = UpdateTask {
            completed: Some(true),
            ..Default::default()
        };
        let first = Task::update(&store, task.id, done.clone()).await.unwrap();
        let second = Task::update(&store, task.id, done).await.unwrap();

        assert!(first.completed);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update_title() {
        let store = DocumentStore::in_memory();
        let task = create(&store, "Laundry").await;

        let updated = Task::update(
            &store,
            task.id,
            UpdateTask {
                title: Some(" Fold laundry ".into()),
                completed: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Fold laundry");
        assert_eq!(Task::find_by_id(&store, task.id).await.unwrap().title, "Fold laundry");
    }

    #[tokio::test]
    async fn test_update_blank_title_rejected_and_unchanged() {
        let store = DocumentStore::in_memory();
        let task = create(&store, "Laundry").await;

        let result = Task::update(
            &store,
            task.id,
            UpdateTask {
                title: Some("   ".into()),
                completed: Some(true),
            },
        )
        .await;

        assert!(matches!(result, Err(RepoError::Validation(_))));
        assert_eq!(Task::find_by_id(&store, task.id).await.unwrap(), task);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = DocumentStore::in_memory();
        let result = Task::update(&store, Uuid::new_v4(), UpdateTask::default()).await;
        assert!(matches!(result, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_removed() {
        let store = DocumentStore::in_memory();
        let task = create(&store, "Laundry").await;

        let removed = Task::delete(&store, task.id).await.unwrap();
        assert_eq!(removed, task);
        assert!(store.snapshot().await.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_leaves_collection() {
        let storage = Arc::new(MemoryStorage::new());
        let store = DocumentStore::from_arc(storage.clone());
        create(&store, "Laundry").await;
        let before = store.snapshot().await.tasks;
        let saves = storage.save_count();

        let result = Task::delete(&store, Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound(_))));
        assert_eq!(store.snapshot().await.tasks, before);
        assert_eq!(storage.save_count(), saves);
    }
}
