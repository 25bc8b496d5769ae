//! Static pages.

use actix_web::{HttpResponse, http::StatusCode};

use crate::middleware::auth::OptionalIdentity;
use crate::views;

/// GET /about
pub async fn about(identity: OptionalIdentity) -> HttpResponse {
    views::render(StatusCode::OK, views::pages::about(identity.as_ref()))
}
