//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod posts;

use actix_web::{HttpRequest, HttpResponse, error::PathError, http::header, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(unmatched_path))
        .route("/api/health", web::get().to(health::health_check))
        // Listings and static pages
        .route("/", web::get().to(posts::home))
        .route("/about", web::get().to(pages::about))
        .route("/user/{username}", web::get().to(posts::user_posts))
        // `/post/new` must be registered ahead of `/post/{id}`
        .service(
            web::resource("/post/new")
                .route(web::get().to(posts::new_form))
                .route(web::post().to(posts::create)),
        )
        .route("/post/{id}", web::get().to(posts::detail))
        .service(
            web::resource("/post/{id}/update")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::update)),
        )
        .service(
            web::resource("/post/{id}/delete")
                .route(web::get().to(posts::delete_confirm))
                .route(web::post().to(posts::delete)),
        )
        // Identity
        .service(
            web::resource("/register")
                .route(web::get().to(auth::register_form))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::post().to(auth::logout));
}

/// A path segment of the wrong shape, like `/post/abc`, is a missing page.
fn unmatched_path(err: PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, path = req.path(), "Unparseable path segment");
    AppError::NotFound(format!("No page found at \"{}\".", req.path())).into()
}

/// 303 to `location`, the answer to every successful form post.
pub(crate) fn see_other(location: impl Into<String>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}
