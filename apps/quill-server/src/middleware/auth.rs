//! Session handling and the identity extractor.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use quill_core::domain::CurrentUser;

use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "quill_session";

/// The request's identity, or `None` for anonymous visitors.
///
/// Never rejects a request: a missing, expired or forged token simply means
/// anonymous. Handlers pass the identity on to the post service, whose guards
/// decide what anonymous callers may do.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<CurrentUser>);

impl OptionalIdentity {
    pub fn as_ref(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

/// Session cookie first, then a `Bearer` token for non-browser clients.
fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token) = session_token(req) else {
            return ready(Ok(OptionalIdentity(None)));
        };

        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Ok(OptionalIdentity(None)));
        };

        match state.tokens.validate_token(&token) {
            Ok(claims) => ready(Ok(OptionalIdentity(Some(claims.into())))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable session token");
                ready(Ok(OptionalIdentity(None)))
            }
        }
    }
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// Cookie that makes the browser forget the session.
pub fn cleared_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

/// `/login?next=<path>` for a request that needs a login first.
pub fn login_url(next: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("/login?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_url_encodes_next() {
        assert_eq!(login_url("/post/new"), "/login?next=%2Fpost%2Fnew");
        assert_eq!(
            login_url("/post/3/update?x=1"),
            "/login?next=%2Fpost%2F3%2Fupdate%3Fx%3D1"
        );
    }

    #[test]
    fn test_cleared_cookie_expires() {
        let cookie = cleared_session_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
