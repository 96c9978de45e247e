use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog publication.
///
/// `pub_date` may lie in the future: such posts are scheduled and stay
/// invisible to everyone but their author until the date passes.
/// `category_id` and `location_id` are nulled when the referenced row
/// is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    /// Stored path or URL of an attached image; serving it is not our job.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post.
    pub fn new(
        author_id: Uuid,
        title: String,
        text: String,
        pub_date: DateTime<Utc>,
        category_id: Option<Uuid>,
        location_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id,
            location_id,
            title,
            text,
            pub_date,
            is_published: true,
            image: None,
            created_at: Utc::now(),
        }
    }
}
