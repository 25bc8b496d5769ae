//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{NewPost, Post, PostDraft, PostWithAuthor, TITLE_MAX_CHARS};
pub use user::{Author, CurrentUser, User};
