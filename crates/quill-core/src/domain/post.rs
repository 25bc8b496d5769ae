use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;
use crate::error::DomainError;

/// Longest title a post may carry, counted in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Post entity - a user-authored article.
///
/// `id` is assigned by the store; `author_id` and `date_posted` are fixed at
/// creation and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

impl Post {
    /// Replace the editable fields, leaving author and timestamp alone.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.content = draft.content;
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

impl NewPost {
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        Self {
            author_id,
            title: draft.title,
            content: draft.content,
            date_posted: Utc::now(),
        }
    }
}

/// A post joined with its author, as listings and detail pages need it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: Author,
}

/// User-editable fields of a post, as submitted through the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check the draft, trimming the title in place.
    pub fn validate(mut self) -> Result<Self, DomainError> {
        self.title = self.title.trim().to_string();

        let mut errors = Vec::new();
        if self.title.is_empty() {
            errors.push("Title is required.".to_string());
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            errors.push(format!(
                "Title must be at most {TITLE_MAX_CHARS} characters."
            ));
        }
        if self.content.trim().is_empty() {
            errors.push("Content is required.".to_string());
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self::new(post.title.clone(), post.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_title() {
        let draft = PostDraft::new("  Hello  ", "body").validate().unwrap();
        assert_eq!(draft.title, "Hello");
    }

    #[test]
    fn test_validate_collects_every_error() {
        let err = PostDraft::new("   ", " \n").validate().unwrap_err();
        match err {
            DomainError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_title_length_counts_chars() {
        let at_limit = "é".repeat(TITLE_MAX_CHARS);
        assert!(PostDraft::new(at_limit, "x").validate().is_ok());

        let too_long = "a".repeat(TITLE_MAX_CHARS + 1);
        assert!(matches!(
            PostDraft::new(too_long, "x").validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_apply_keeps_author_and_date() {
        let author_id = Uuid::new_v4();
        let posted = Utc::now();
        let mut post = Post {
            id: 7,
            author_id,
            title: "Hello".into(),
            content: "first".into(),
            date_posted: posted,
        };

        post.apply(PostDraft::new("Hello v2", "second"));

        assert_eq!(post.title, "Hello v2");
        assert_eq!(post.content, "second");
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.date_posted, posted);
    }
}
