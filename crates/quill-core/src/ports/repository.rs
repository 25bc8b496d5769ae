use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostWithAuthor, User};
use crate::error::RepoError;
use crate::pagination::PageWindow;

/// Generic repository trait shared by every stored entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an entity that already exists.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User lookups needed by listings and the login flow.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Insert a new user; fails with `Constraint` on a taken username or email.
    async fn create(&self, user: User) -> Result<User, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post store.
///
/// `author_id = None` selects every post. Listings return posts joined with
/// their author, newest `date_posted` first with ties broken by the higher
/// `id`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Insert a post, letting the store assign its ID.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn find_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>, RepoError>;

    async fn count(&self, author_id: Option<Uuid>) -> Result<u64, RepoError>;

    async fn list(
        &self,
        author_id: Option<Uuid>,
        window: PageWindow,
    ) -> Result<Vec<PostWithAuthor>, RepoError>;
}
