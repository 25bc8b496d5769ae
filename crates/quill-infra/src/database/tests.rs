use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

use quill_core::domain::{NewPost, Post, PostDraft};
use quill_core::error::RepoError;
use quill_core::pagination::PageWindow;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

use super::entity::{post, user};
use super::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn user_row(id: Uuid, username: &str) -> user::Model {
    user::Model {
        id,
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password_hash: "hash".to_owned(),
        date_joined: Utc::now().into(),
    }
}

fn post_row(id: i64, author_id: Uuid, title: &str) -> post::Model {
    post::Model {
        id,
        author_id,
        title: title.to_owned(),
        content: "Content".to_owned(),
        date_posted: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let author_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(42, author_id, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, i64>::find_by_id(&repo, 42).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 42);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_with_author_joins_username() {
    let author_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![(
            post_row(1, author_id, "Hello"),
            Some(user_row(author_id, "alice")),
        )]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let found = repo.find_with_author(1).await.unwrap().unwrap();

    assert_eq!(found.post.title, "Hello");
    assert_eq!(found.author.username, "alice");
    assert_eq!(found.author.id, author_id);
}

#[tokio::test]
async fn test_list_builds_ordered_page_query() {
    let author_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            (post_row(2, author_id, "Second"), Some(user_row(author_id, "alice"))),
            (post_row(1, author_id, "First"), Some(user_row(author_id, "alice"))),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let window = PageWindow { number: 2, offset: 5, limit: 5 };
    let rows = repo
        .list(Some(author_id), window)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].post.title, "Second");

    let log = repo.db.into_transaction_log();
    let sql = log[0].statements()[0].sql.clone();
    assert!(sql.contains(r#"ORDER BY "posts"."date_posted" DESC, "posts"."id" DESC"#));
    assert!(sql.contains("LIMIT"));
    assert!(sql.contains("OFFSET"));
    assert!(sql.contains(r#""posts"."author_id" = $1"#));
}

#[tokio::test]
async fn test_create_post_returns_assigned_id() {
    let author_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(17, author_id, "Hello")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let created = repo
        .create(NewPost::new(author_id, PostDraft::new("Hello", "Content")))
        .await
        .unwrap();

    assert_eq!(created.id, 17);
    assert_eq!(created.author_id, author_id);
}

#[tokio::test]
async fn test_save_rewrites_editable_columns_only() {
    let author_id = Uuid::new_v4();
    let stored = post_row(7, author_id, "Hello v2");
    let posted = stored.date_posted;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let edited = Post {
        id: 7,
        author_id,
        title: "Hello v2".to_owned(),
        content: "Edited".to_owned(),
        date_posted: posted.into(),
    };
    let saved = BaseRepository::<Post, i64>::save(&repo, edited).await.unwrap();
    assert_eq!(saved.title, "Hello v2");
    assert_eq!(saved.author_id, author_id);

    let log = repo.db.into_transaction_log();
    let statement = &log[0].statements()[0];
    assert!(statement.sql.starts_with(r#"UPDATE "posts" SET"#));
    assert!(statement.sql.contains(r#"WHERE "posts"."id" = "#));

    let values = statement.values.clone().unwrap().0;
    assert!(values.contains(&Value::from("Hello v2")));
    assert!(values.contains(&Value::from("Edited")));
    assert!(values.contains(&Value::from(author_id)));
    assert!(values.contains(&Value::from(posted)));
    assert!(values.contains(&Value::from(7i64)));
}

#[tokio::test]
async fn test_save_of_vanished_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let ghost = Post {
        id: 404,
        author_id: Uuid::new_v4(),
        title: "t".to_owned(),
        content: "c".to_owned(),
        date_posted: Utc::now(),
    };
    let result = BaseRepository::<Post, i64>::save(&repo, ghost).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, i64>::delete(&repo, 99).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_user_by_username() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user_row(id, "bob")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user = repo.find_by_username("bob").await.unwrap().unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.email, "bob@example.com");
}
