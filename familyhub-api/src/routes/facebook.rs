//! Stubbed Facebook feed
//!
//! There is no Graph API call: the feed is synthesized from the newest local
//! posts so the frontend has something shaped like the real thing.

use crate::app::AppState;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use familyhub_shared::models::post::Post;
use serde::Serialize;

/// Number of posts mirrored into the feed
pub const FEED_LIMIT: usize = 10;

const PLATFORM: &str = "facebook";

const SOURCE: &str = "facebook-stub";

/// One synthetic feed entry
///
/// Field names follow the Graph API (`created_time`), not the camelCase of
/// the rest of the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub id: String,
    pub message: String,
    pub category: Option<String>,
    pub created_time: DateTime<Utc>,
    pub platform: &'static str,
    pub source: &'static str,
}

/// Feed response
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
}

/// Maps posts to feed items, keeping their order
pub fn synthesize_feed(posts: &[Post]) -> Vec<FeedItem> {
    posts
        .iter()
        .map(|post| FeedItem {
            id: format!("fb-{}", post.id),
            message: post.content.clone(),
            category: post.category.clone(),
            created_time: post.created_at,
            platform: PLATFORM,
            source: SOURCE,
        })
        .collect()
}

/// `GET /api/facebook/feed`
pub async fn feed(State(state): State<AppState>) -> Json<FeedResponse> {
    let posts = Post::recent(&state.store, FEED_LIMIT).await;
    Json(FeedResponse {
        items: synthesize_feed(&posts),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_synthesize_feed() {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: None,
            category: Some("life".to_string()),
            subcategory: None,
            content: "Picnic on Sunday".to_string(),
            created_at: Utc::now(),
        };

        let items = synthesize_feed(std::slice::from_ref(&post));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, format!("fb-{}", post.id));
        assert_eq!(items[0].message, "Picnic on Sunday");
        assert_eq!(items[0].category.as_deref(), Some("life"));
        assert_eq!(items[0].created_time, post.created_at);
        assert_eq!(items[0].platform, "facebook");
        assert_eq!(items[0].source, "facebook-stub");
    }

    #[test]
    fn test_feed_item_wire_names() {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: Some("alice".to_string()),
            category: None,
            subcategory: None,
            content: "Hi".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&synthesize_feed(&[post])[0]).unwrap();
        assert!(value["created_time"].is_string());
        assert!(value.get("createdTime").is_none());
        assert_eq!(value["platform"], "facebook");
    }
}
