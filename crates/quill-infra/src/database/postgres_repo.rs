//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, SelectTwo,
};
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostWithAuthor, User};
use quill_core::error::RepoError;
use quill_core::pagination::PageWindow;
use quill_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        tracing::debug!(username = %user.username, "Inserting user");

        let active: user::ActiveModel = user.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

fn by_author(author_id: Option<Uuid>) -> Select<PostEntity> {
    let select = PostEntity::find();
    match author_id {
        Some(id) => select.filter(post::Column::AuthorId.eq(id)),
        None => select,
    }
}

fn newest_first(select: SelectTwo<PostEntity, UserEntity>) -> SelectTwo<PostEntity, UserEntity> {
    select
        .order_by_desc(post::Column::DatePosted)
        .order_by_desc(post::Column::Id)
}

/// Pair a post row with its joined author; the foreign key makes a miss a data error.
fn with_author(row: (post::Model, Option<user::Model>)) -> Result<PostWithAuthor, RepoError> {
    let (post, author) = row;
    let author: User = author
        .ok_or_else(|| RepoError::Query(format!("post {} has no author row", post.id)))?
        .into();

    Ok(PostWithAuthor {
        post: post.into(),
        author: author.as_author(),
    })
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new_post.into();
        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find_with_author(&self, id: i64) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        row.map(with_author).transpose()
    }

    async fn count(&self, author_id: Option<Uuid>) -> Result<u64, RepoError> {
        by_author(author_id)
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn list(
        &self,
        author_id: Option<Uuid>,
        window: PageWindow,
    ) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = newest_first(by_author(author_id).find_also_related(UserEntity))
            .offset(window.offset)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(with_author).collect()
    }
}
