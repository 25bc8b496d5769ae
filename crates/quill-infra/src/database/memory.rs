//! In-memory store - used when no database is configured, and by tests.
//!
//! Users and posts share one lock so a listing always sees the authors of
//! the posts it returns. Data is lost on process restart.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostWithAuthor, User};
use quill_core::error::RepoError;
use quill_core::pagination::PageWindow;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    posts: BTreeMap<i64, Post>,
    last_post_id: i64,
}

impl State {
    fn join(&self, post: &Post) -> Result<PostWithAuthor, RepoError> {
        let author = self
            .users
            .get(&post.author_id)
            .ok_or_else(|| RepoError::Query(format!("post {} has no author row", post.id)))?;

        Ok(PostWithAuthor {
            post: post.clone(),
            author: author.as_author(),
        })
    }

    fn posts_by(&self, author_id: Option<Uuid>) -> impl Iterator<Item = &Post> {
        self.posts
            .values()
            .filter(move |p| author_id.is_none_or(|id| p.author_id == id))
    }
}

/// Shared backing state for the in-memory repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            state: self.state.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            state: self.state.clone(),
        }
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    state: Arc<RwLock<State>>,
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    state: Arc<RwLock<State>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut state = self.state.write().await;
        let slot = state.users.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.users.remove(&id).ok_or(RepoError::NotFound)?;
        // Posts go with their author, like the cascading foreign key.
        state.posts.retain(|_, post| post.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut state = self.state.write().await;
        let taken = state
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken || state.users.contains_key(&user.id) {
            return Err(RepoError::Constraint(format!(
                "user '{}' already exists",
                user.username
            )));
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        let slot = state.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&new_post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                new_post.author_id
            )));
        }

        state.last_post_id += 1;
        let post = Post {
            id: state.last_post_id,
            author_id: new_post.author_id,
            title: new_post.title,
            content: new_post.content,
            date_posted: new_post.date_posted,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>, RepoError> {
        let state = self.state.read().await;
        state.posts.get(&id).map(|p| state.join(p)).transpose()
    }

    async fn count(&self, author_id: Option<Uuid>) -> Result<u64, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts_by(author_id).count() as u64)
    }

    async fn list(
        &self,
        author_id: Option<Uuid>,
        window: PageWindow,
    ) -> Result<Vec<PostWithAuthor>, RepoError> {
        let state = self.state.read().await;
        let mut posts: Vec<&Post> = state.posts_by(author_id).collect();
        posts.sort_by_key(|p| Reverse((p.date_posted, p.id)));

        posts
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .map(|p| state.join(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use quill_core::domain::PostDraft;

    use super::*;

    async fn seeded() -> (InMemoryStore, User) {
        let store = InMemoryStore::new();
        let alice = User::new("alice".into(), "alice@example.com".into(), "hash".into());
        store.users().create(alice.clone()).await.unwrap();
        (store, alice)
    }

    fn window(offset: u64, limit: u64) -> PageWindow {
        PageWindow {
            number: offset / limit + 1,
            offset,
            limit,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let (store, alice) = seeded().await;
        let posts = store.posts();

        let first = posts
            .create(NewPost::new(alice.id, PostDraft::new("one", "x")))
            .await
            .unwrap();
        let second = posts
            .create(NewPost::new(alice.id, PostDraft::new("two", "x")))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_author() {
        let (store, _) = seeded().await;
        let result = store
            .posts()
            .create(NewPost::new(Uuid::new_v4(), PostDraft::new("t", "c")))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_constraint() {
        let (store, _) = seeded().await;
        let again = User::new("alice".into(), "other@example.com".into(), "hash".into());

        assert!(matches!(
            store.users().create(again).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_id() {
        let (store, alice) = seeded().await;
        let posts = store.posts();
        let base = Utc::now();

        for (title, offset) in [("old", 0), ("new", 10), ("mid", 5)] {
            let mut new_post = NewPost::new(alice.id, PostDraft::new(title, "x"));
            new_post.date_posted = base + Duration::seconds(offset);
            posts.create(new_post).await.unwrap();
        }

        let newest = posts.list(None, window(0, 5)).await.unwrap();
        let titles: Vec<_> = newest.iter().map(|p| p.post.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid", "old"]);

        let second = posts.list(None, window(1, 1)).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].post.title, "mid");
    }

    #[tokio::test]
    async fn test_same_timestamp_falls_back_to_id() {
        let (store, alice) = seeded().await;
        let posts = store.posts();
        let at = Utc::now();

        for title in ["first", "second"] {
            let mut new_post = NewPost::new(alice.id, PostDraft::new(title, "x"));
            new_post.date_posted = at;
            posts.create(new_post).await.unwrap();
        }

        let listed = posts.list(None, window(0, 5)).await.unwrap();
        assert_eq!(listed[0].post.title, "second");
        assert_eq!(listed[1].post.title, "first");
    }

    #[tokio::test]
    async fn test_count_filters_by_author() {
        let (store, alice) = seeded().await;
        let bob = User::new("bob".into(), "bob@example.com".into(), "hash".into());
        store.users().create(bob.clone()).await.unwrap();

        let posts = store.posts();
        posts
            .create(NewPost::new(alice.id, PostDraft::new("a", "x")))
            .await
            .unwrap();
        posts
            .create(NewPost::new(bob.id, PostDraft::new("b", "x")))
            .await
            .unwrap();

        assert_eq!(posts.count(None).await.unwrap(), 2);
        assert_eq!(posts.count(Some(bob.id)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_and_delete_missing_post() {
        let (store, alice) = seeded().await;
        let posts = store.posts();
        let ghost = Post {
            id: 404,
            author_id: alice.id,
            title: "t".into(),
            content: "c".into(),
            date_posted: Utc::now(),
        };

        assert!(matches!(posts.save(ghost).await, Err(RepoError::NotFound)));
        assert!(matches!(posts.delete(404).await, Err(RepoError::NotFound)));
    }
}
