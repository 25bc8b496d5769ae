use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an account known to the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated ID.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            date_joined: Utc::now(),
        }
    }

    pub fn as_author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Public face of a user, as shown next to their posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

/// The authenticated identity behind the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

impl CurrentUser {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    /// Ownership is plain identity equality, nothing more.
    pub fn is_author_of(&self, post: &super::Post) -> bool {
        self.id == post.author_id
    }
}
