//! Error handling - maps domain failures onto HTML error pages and redirects.

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, http::header};
use std::fmt;

use quill_core::DomainError;
use quill_core::error::RepoError;
use quill_core::ports::AuthError;

use crate::middleware::auth::login_url;
use crate::views;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// Redirect to the login page, returning to `next` afterwards.
    LoginRequired { next: String },
    Forbidden,
    /// A form body that could not be read at all.
    BadRequest(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::LoginRequired { next } => write!(f, "Login required for {}", next),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::LoginRequired { .. } => StatusCode::SEE_OTHER,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let page = match self {
            AppError::LoginRequired { next } => {
                return HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, login_url(next)))
                    .finish();
            }
            AppError::NotFound(detail) => views::errors::error_page(status, detail),
            AppError::Forbidden => views::errors::error_page(
                status,
                "You are not allowed to change a post written by someone else.",
            ),
            AppError::BadRequest(detail) => views::errors::error_page(status, detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                views::errors::error_page(status, "Something went wrong on our side.")
            }
        };

        views::render(status, page)
    }
}

impl AppError {
    /// Convert a domain error, sending anonymous callers back to `req` after login.
    pub fn from_domain(err: DomainError, req: &HttpRequest) -> Self {
        match err {
            DomainError::Unauthenticated => {
                let uri = req.uri();
                let next = uri
                    .path_and_query()
                    .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
                AppError::LoginRequired { next }
            }
            other => other.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, key } => {
                AppError::NotFound(format!("No {} found matching \"{}\".", entity, key))
            }
            DomainError::Unauthenticated => AppError::LoginRequired {
                next: "/".to_string(),
            },
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::Validation(errors) => AppError::BadRequest(errors.join(" ")),
            DomainError::Conflict(taken) => AppError::BadRequest(taken.join(" ")),
            DomainError::Repository(e) => e.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found.".to_string()),
            RepoError::Constraint(msg) => AppError::BadRequest(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Attach the current request to domain results, for login redirects.
pub trait ForRequest<T> {
    fn for_request(self, req: &HttpRequest) -> AppResult<T>;
}

impl<T> ForRequest<T> for Result<T, DomainError> {
    fn for_request(self, req: &HttpRequest) -> AppResult<T> {
        self.map_err(|e| AppError::from_domain(e, req))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
