//! Authentication Middleware
//!
//! Session cookie validation for protected routes and the administrator
//! guard for the admin pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;

use crate::config::SessionSettings;
use crate::presentation::http::extractors::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Where unauthenticated visitors are sent
pub const LOGIN_PATH: &str = "/auth/login";

/// Session cookie carrying a freshly issued token.
pub fn session_cookie(settings: &SessionSettings, token: String) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(settings.secure_cookie)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(settings.expiry_hours))
        .build()
}

/// Remove the session cookie from the jar.
pub fn clear_session(jar: CookieJar, settings: &SessionSettings) -> CookieJar {
    jar.remove(Cookie::build(settings.cookie_name.clone()).path("/"))
}

/// Authentication middleware that validates the session cookie
///
/// The member is reloaded on every request so role changes and deletions take
/// effect immediately. Anything short of a valid session redirects to the
/// login page and drops the cookie.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &jar).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), "not signed in: {}", e);
            (clear_session(jar, &state.settings.session), Redirect::to(LOGIN_PATH)).into_response()
        }
    }
}

async fn authenticate(state: &AppState, jar: &CookieJar) -> Result<AuthUser, AppError> {
    let token = jar
        .get(&state.settings.session.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing session cookie".into()))?;

    let claims = state.sessions.decode(&token)?;
    let member = state
        .services
        .members
        .get_member(claims.member_id()?)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Unauthorized("Session member no longer exists".into()),
            other => other,
        })?;

    Ok(AuthUser {
        member_id: member.id,
        full_name: member.full_name,
        role: member.role,
    })
}

/// Administrator guard; must run inside [`auth_middleware`]
pub async fn admin_middleware(user: AuthUser, request: Request, next: Next) -> Result<Response, AppError> {
    if !user.role.is_admin() {
        tracing::warn!(member_id = user.member_id, path = %request.uri().path(), "admin page refused");
        return Err(AppError::Forbidden(
            "Only administrators can manage this section".into(),
        ));
    }

    Ok(next.run(request).await)
}
