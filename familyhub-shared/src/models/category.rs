//! Category reference data
//!
//! A mapping from category name to its ordered subcategories, e.g.
//! `{"life": ["family", "health"], "business": ["finance"]}`. No endpoint
//! mutates it; it is edited directly in the data file.

use std::collections::BTreeMap;

use crate::store::DocumentStore;

/// Category name → ordered subcategory names
pub type Categories = BTreeMap<String, Vec<String>>;

/// Accessors for the category mapping
pub struct Category;

impl Category {
    /// Returns the full mapping
    pub async fn all(store: &DocumentStore) -> Categories {
        store.read(|doc| doc.categories.clone()).await
    }

    /// Returns the subcategories of one category, if it exists
    pub async fn subcategories(store: &DocumentStore, category: &str) -> Option<Vec<String>> {
        store
            .read(|doc| doc.categories.get(category).cloned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Document, MemoryStorage};

    #[tokio::test]
    async fn test_all_and_subcategories() {
        let mut categories = Categories::new();
        categories.insert("life".into(), vec!["family".into(), "health".into()]);
        let store = DocumentStore::new(MemoryStorage::with_document(Document {
            categories: categories.clone(),
            ..Default::default()
        }));

        assert_eq!(Category::all(&store).await, categories);
        assert_eq!(
            Category::subcategories(&store, "life").await,
            Some(vec!["family".to_string(), "health".to_string()])
        );
        assert_eq!(Category::subcategories(&store, "business").await, None);
    }
}
