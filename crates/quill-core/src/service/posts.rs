use std::sync::Arc;

use crate::domain::{Author, CurrentUser, NewPost, Post, PostDraft, PostWithAuthor};
use crate::error::DomainError;
use crate::pagination::{self, Page, PageSelector};
use crate::ports::{PostRepository, UserRepository};

use super::guard::{ensure_author, require_login};

/// Listing parameters shared by the home and per-author pages.
#[derive(Debug, Clone, Copy)]
pub struct ListingConfig {
    pub per_page: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { per_page: 5 }
    }
}

/// One author's posts, with the author resolved.
#[derive(Debug, Clone)]
pub struct AuthorListing {
    pub author: Author,
    pub posts: Page<PostWithAuthor>,
}

/// Post operations: listings, detail and owner-gated mutations.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    listing: ListingConfig,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        listing: ListingConfig,
    ) -> Self {
        Self {
            posts,
            users,
            listing,
        }
    }

    /// Every post, newest first.
    pub async fn list_all(&self, page: PageSelector) -> Result<Page<PostWithAuthor>, DomainError> {
        self.list(None, page).await
    }

    /// Posts by `username`; `NotFound` when no such user exists.
    pub async fn list_by_author(
        &self,
        username: &str,
        page: PageSelector,
    ) -> Result<AuthorListing, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let posts = self.list(Some(user.id), page).await?;
        Ok(AuthorListing {
            author: user.as_author(),
            posts,
        })
    }

    async fn list(
        &self,
        author_id: Option<uuid::Uuid>,
        page: PageSelector,
    ) -> Result<Page<PostWithAuthor>, DomainError> {
        let total = self.posts.count(author_id).await?;
        let window = pagination::resolve(page, total, self.listing.per_page)?;
        let items = self.posts.list(author_id, window).await?;

        Ok(Page::new(items, window, total))
    }

    /// A single post; readable by anyone.
    pub async fn get_by_id(&self, id: i64) -> Result<PostWithAuthor, DomainError> {
        self.posts
            .find_with_author(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    /// Run the mutation guards for `id` and hand back the post they let through.
    pub async fn authorize(
        &self,
        current: Option<&CurrentUser>,
        id: i64,
    ) -> Result<PostWithAuthor, DomainError> {
        let user = require_login(current)?;
        let found = self.get_by_id(id).await?;
        ensure_author(user, &found.post)?;
        Ok(found)
    }

    pub async fn create(
        &self,
        current: Option<&CurrentUser>,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let user = require_login(current)?;
        let draft = draft.validate()?;

        let post = self.posts.create(NewPost::new(user.id, draft)).await?;
        tracing::info!(post_id = post.id, user_id = %user.id, "Post created");
        Ok(post)
    }

    /// Rewrite title and content; author and `date_posted` stay as stored.
    pub async fn update(
        &self,
        current: Option<&CurrentUser>,
        id: i64,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let PostWithAuthor { mut post, .. } = self.authorize(current, id).await?;
        let draft = draft.validate()?;

        post.apply(draft);
        let post = self.posts.save(post).await?;
        tracing::info!(post_id = post.id, user_id = %post.author_id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, current: Option<&CurrentUser>, id: i64) -> Result<(), DomainError> {
        let PostWithAuthor { post, .. } = self.authorize(current, id).await?;

        self.posts.delete(post.id).await?;
        tracing::info!(post_id = post.id, user_id = %post.author_id, "Post deleted");
        Ok(())
    }
}
