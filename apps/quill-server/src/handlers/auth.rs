//! Sign-up, login and logout handlers.

use actix_web::{HttpResponse, http::StatusCode, web};

use quill_core::DomainError;
use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::UserRepository;
use quill_shared::{LoginForm, NextQuery, RegisterForm};

use super::see_other;
use crate::middleware::auth::{OptionalIdentity, cleared_session_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/// Form action that keeps `next` across a failed attempt.
fn login_action(query: &NextQuery) -> String {
    match query.next {
        Some(_) => crate::middleware::auth::login_url(query.local_target()),
        None => "/login".to_string(),
    }
}

/// `Conflict` naming every field of `form` that another account already uses.
async fn ensure_available(
    users: &dyn UserRepository,
    form: &RegisterForm,
) -> Result<(), DomainError> {
    let mut taken = Vec::new();
    if users.find_by_username(&form.username).await?.is_some() {
        taken.push("A user with that username already exists.".to_string());
    }
    if users.find_by_email(&form.email).await?.is_some() {
        taken.push("A user with that email already exists.".to_string());
    }

    if taken.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Conflict(taken))
    }
}

async fn insert_user(users: &dyn UserRepository, user: User) -> Result<User, DomainError> {
    users.create(user).await.map_err(|err| match err {
        // Lost a race with a concurrent sign-up.
        RepoError::Constraint(_) => {
            DomainError::Conflict(vec!["That username or email was just taken.".to_string()])
        }
        other => other.into(),
    })
}

/// GET /register
pub async fn register_form(identity: OptionalIdentity) -> HttpResponse {
    views::render(
        StatusCode::OK,
        views::auth::register(identity.as_ref(), &RegisterForm::default(), &[]),
    )
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let mut form = form.into_inner();
    form.username = form.username.trim().to_string();
    form.email = form.email.trim().to_string();

    let rerender = |status, errors: &[String], form: &RegisterForm| {
        views::render(status, views::auth::register(identity.as_ref(), form, errors))
    };

    let problems = form.problems();
    if !problems.is_empty() {
        return Ok(rerender(StatusCode::UNPROCESSABLE_ENTITY, &problems, &form));
    }

    let registered = match ensure_available(state.users.as_ref(), &form).await {
        Ok(()) => {
            let password_hash = state.passwords.hash(&form.password)?;
            let user = User::new(form.username.clone(), form.email.clone(), password_hash);
            insert_user(state.users.as_ref(), user).await
        }
        Err(err) => Err(err),
    };

    match registered {
        Ok(user) => {
            tracing::info!(user_id = %user.id, username = %user.username, "User registered");
            Ok(see_other("/login"))
        }
        Err(DomainError::Conflict(taken)) => Ok(rerender(StatusCode::CONFLICT, &taken, &form)),
        Err(e) => Err(e.into()),
    }
}

/// GET /login
pub async fn login_form(
    identity: OptionalIdentity,
    query: web::Query<NextQuery>,
) -> HttpResponse {
    views::render(
        StatusCode::OK,
        views::auth::login(identity.as_ref(), &login_action(&query), "", &[]),
    )
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let LoginForm { username, password } = form.into_inner();
    let username = username.trim();

    let user = state.users.find_by_username(username).await?;
    let verified = match &user {
        Some(user) => state.passwords.verify(&password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::info!(username = %username, "Rejected login");
        return Ok(views::render(
            StatusCode::UNAUTHORIZED,
            views::auth::login(
                None,
                &login_action(&query),
                username,
                &["Please enter a correct username and password.".to_string()],
            ),
        ));
    };

    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cookie = session_cookie(token, state.tokens.expiration_seconds(), state.cookie_secure);
    tracing::info!(user_id = %user.id, "User logged in");

    let mut response = see_other(query.local_target());
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

/// POST /logout
pub async fn logout() -> AppResult<HttpResponse> {
    let mut response = views::render(StatusCode::OK, views::auth::logged_out());
    response
        .add_cookie(&cleared_session_cookie())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;

    use crate::handlers::test_support::{body_text, location, state, test_app};
    use crate::middleware::auth::SESSION_COOKIE;

    const SIGN_UP: [(&str, &str); 4] = [
        ("username", "alice"),
        ("email", "alice@example.com"),
        ("password", "correct horse"),
        ("password_confirm", "correct horse"),
    ];

    #[actix_web::test]
    async fn test_register_then_login_sets_session() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form(SIGN_UP)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/login");

        let req = test::TestRequest::post()
            .uri("/login?next=%2Fpost%2Fnew")
            .set_form([("username", "alice"), ("password", "correct horse")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), "/post/new");

        let session = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie");
        let req = test::TestRequest::get()
            .uri("/post/new")
            .cookie(session.into_owned())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_duplicate_registration_conflicts() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form(SIGN_UP)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SEE_OTHER);

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form(SIGN_UP)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body = body_text(res).await;
        assert!(body.contains("A user with that username already exists."));
        assert!(body.contains("A user with that email already exists."));
    }

    #[actix_web::test]
    async fn test_login_ignores_off_site_next() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form(SIGN_UP)
            .to_request();
        test::call_service(&app, req).await;

        for next in ["%2F%09%2Fevil.example", "%2F%2Fevil.example", "https%3A%2F%2Fevil.example"] {
            let req = test::TestRequest::post()
                .uri(&format!("/login?next={next}"))
                .set_form([("username", "alice"), ("password", "correct horse")])
                .to_request();
            let res = test::call_service(&app, req).await;

            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&res), "/");
        }
    }

    #[actix_web::test]
    async fn test_wrong_password_is_rejected() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/register")
            .set_form(SIGN_UP)
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "wrong horse")])
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());
        assert!(body_text(res).await.contains("correct username and password"));
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::post().uri("/logout").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let cleared = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("removal cookie");
        assert_eq!(cleared.value(), "");
    }
}
