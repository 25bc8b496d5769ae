//! Post listing, detail and mutation handlers.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};

use quill_core::domain::PostDraft;
use quill_core::service::require_login;
use quill_core::{DomainError, PageSelector};
use quill_shared::{PageQuery, PostForm};

use super::see_other;
use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult, ForRequest};
use crate::state::AppState;
use crate::views;

const NEW_POST_LEGEND: &str = "New Post";
const EDIT_POST_LEGEND: &str = "Update Post";

/// Post form body; a body error is held back until the guards have run.
type FormBody = Result<web::Form<PostForm>, actix_web::Error>;

fn draft_from(form: web::Form<PostForm>) -> PostDraft {
    let PostForm { title, content } = form.into_inner();
    PostDraft::new(title, content)
}

fn unreadable(err: actix_web::Error) -> AppError {
    tracing::debug!(error = %err, "Unreadable post form");
    AppError::BadRequest("The submitted form could not be read.".to_string())
}

/// GET /
pub async fn home(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let selector = PageSelector::parse(query.page.as_deref())?;
    let page = state.posts.list_all(selector).await?;

    Ok(views::render(
        StatusCode::OK,
        views::posts::home(identity.as_ref(), &page),
    ))
}

/// GET /user/{username}
pub async fn user_posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let selector = PageSelector::parse(query.page.as_deref())?;
    let listing = state.posts.list_by_author(&username, selector).await?;

    Ok(views::render(
        StatusCode::OK,
        views::posts::author_posts(identity.as_ref(), &listing),
    ))
}

/// GET /post/{id}
pub async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_by_id(id.into_inner()).await?;

    Ok(views::render(
        StatusCode::OK,
        views::posts::detail(identity.as_ref(), &post),
    ))
}

/// GET /post/new
pub async fn new_form(req: HttpRequest, identity: OptionalIdentity) -> AppResult<HttpResponse> {
    let viewer = require_login(identity.as_ref()).for_request(&req)?;

    Ok(views::render(
        StatusCode::OK,
        views::posts::form(
            Some(viewer),
            NEW_POST_LEGEND,
            "/post/new",
            &PostDraft::default(),
            &[],
        ),
    ))
}

/// POST /post/new
pub async fn create(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: FormBody,
) -> AppResult<HttpResponse> {
    let draft = match form {
        Ok(form) => draft_from(form),
        Err(err) => {
            require_login(identity.as_ref()).for_request(&req)?;
            return Err(unreadable(err));
        }
    };

    match state.posts.create(identity.as_ref(), draft.clone()).await {
        Ok(post) => Ok(see_other(format!("/post/{}", post.id))),
        Err(DomainError::Validation(errors)) => Ok(views::render(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::posts::form(identity.as_ref(), NEW_POST_LEGEND, "/post/new", &draft, &errors),
        )),
        Err(e) => Err(e).for_request(&req),
    }
}

/// GET /post/{id}/update
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let found = state
        .posts
        .authorize(identity.as_ref(), id)
        .await
        .for_request(&req)?;

    Ok(views::render(
        StatusCode::OK,
        views::posts::form(
            identity.as_ref(),
            EDIT_POST_LEGEND,
            &format!("/post/{id}/update"),
            &PostDraft::from(&found.post),
            &[],
        ),
    ))
}

/// POST /post/{id}/update
pub async fn update(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    id: web::Path<i64>,
    form: FormBody,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let draft = match form {
        Ok(form) => draft_from(form),
        Err(err) => {
            state
                .posts
                .authorize(identity.as_ref(), id)
                .await
                .for_request(&req)?;
            return Err(unreadable(err));
        }
    };

    match state.posts.update(identity.as_ref(), id, draft.clone()).await {
        Ok(post) => Ok(see_other(format!("/post/{}", post.id))),
        Err(DomainError::Validation(errors)) => Ok(views::render(
            StatusCode::UNPROCESSABLE_ENTITY,
            views::posts::form(
                identity.as_ref(),
                EDIT_POST_LEGEND,
                &format!("/post/{id}/update"),
                &draft,
                &errors,
            ),
        )),
        Err(e) => Err(e).for_request(&req),
    }
}

/// GET /post/{id}/delete
pub async fn delete_confirm(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let found = state
        .posts
        .authorize(identity.as_ref(), id.into_inner())
        .await
        .for_request(&req)?;

    Ok(views::render(
        StatusCode::OK,
        views::posts::confirm_delete(identity.as_ref(), &found),
    ))
}

/// POST /post/{id}/delete
pub async fn delete(
    req: HttpRequest,
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(identity.as_ref(), id.into_inner())
        .await
        .for_request(&req)?;

    Ok(see_other("/"))
}
