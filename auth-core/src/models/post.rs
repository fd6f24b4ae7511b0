use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::ownership::Ownable;

/// A post or reply. Owned by the user that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub body: String,
    pub user_id: String,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(body: String, user_id: String, parent_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            body,
            user_id,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Ownable for Post {
    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
pub struct CreatePostInput {
    #[validate(length(min = 2, max = 250, message = "body must be between 2 and 250 characters"))]
    pub body: String,
}

impl CreatePostInput {
    pub const FIELD_ORDER: [&'static str; 1] = ["body"];

    pub fn sanitize(&mut self) {
        self.body = self.body.trim().to_string();
    }
}
