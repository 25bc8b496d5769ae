//! Authorization guards for post mutations.

use crate::domain::{CurrentUser, Post};
use crate::error::DomainError;

/// Fail with `Unauthenticated` when there is no identity.
pub fn require_login(current: Option<&CurrentUser>) -> Result<&CurrentUser, DomainError> {
    current.ok_or(DomainError::Unauthenticated)
}

/// Fail with `Forbidden` unless `current` wrote `post`.
pub fn ensure_author(current: &CurrentUser, post: &Post) -> Result<(), DomainError> {
    if current.is_author_of(post) {
        Ok(())
    } else {
        tracing::warn!(
            post_id = post.id,
            user_id = %current.id,
            author_id = %post.author_id,
            "Refusing change to a post by another author"
        );
        Err(DomainError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn post_by(author_id: Uuid) -> Post {
        Post {
            id: 1,
            author_id,
            title: "t".into(),
            content: "c".into(),
            date_posted: Utc::now(),
        }
    }

    #[test]
    fn test_require_login() {
        assert!(matches!(require_login(None), Err(DomainError::Unauthenticated)));

        let alice = CurrentUser::new(Uuid::new_v4(), "alice");
        assert_eq!(require_login(Some(&alice)).unwrap(), &alice);
    }

    #[test]
    fn test_ensure_author_compares_ids_only() {
        let id = Uuid::new_v4();
        let post = post_by(id);

        assert!(ensure_author(&CurrentUser::new(id, "renamed"), &post).is_ok());
        assert!(matches!(
            ensure_author(&CurrentUser::new(Uuid::new_v4(), "alice"), &post),
            Err(DomainError::Forbidden)
        ));
    }
}
