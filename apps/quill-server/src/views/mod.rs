//! Server-rendered HTML pages.

pub mod auth;
pub mod errors;
pub mod layout;
pub mod pages;
pub mod posts;

use actix_web::{HttpResponse, http::StatusCode, http::header::ContentType};
use maud::Markup;

/// Wrap rendered markup in an HTML response.
pub fn render(status: StatusCode, markup: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(markup.into_string())
}
