//! Authentication Handlers

use axum::{
    extract::{rejection::FormRejection, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::form_body;
use crate::application::dto::{LoginForm, LoginView, SignUpForm};
use crate::domain::Member;
use crate::presentation::http::flash::{redirect_with, take_flash};
use crate::presentation::middleware::{clear_session, session_cookie, LOGIN_PATH};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Landing page after signing in
pub const HOME_PATH: &str = "/projects";

/// Login page view model
pub async fn login_page(jar: CookieJar) -> (CookieJar, Json<LoginView>) {
    let (jar, flash) = take_flash(jar);
    (jar, Json(LoginView { flash }))
}

/// Sign in with email and password
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let member = match form_body(form) {
        Ok(form) => state.services.auth.sign_in(form).await,
        Err(e) => Err(e),
    };

    start_session(&state, jar, member, |m| format!("Welcome back, {}", m.first_name))
}

/// Create an account and sign in
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<SignUpForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let member = match form_body(form) {
        Ok(form) => state.services.auth.sign_up(form).await,
        Err(e) => Err(e),
    };

    start_session(&state, jar, member, |m| format!("Welcome, {}", m.first_name))
}

/// Drop the session cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = clear_session(jar, &state.settings.session);
    redirect_with(jar, LOGIN_PATH, Ok("You have been signed out".into()))
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    member: Result<Member, AppError>,
    greeting: impl FnOnce(&Member) -> String,
) -> (CookieJar, Redirect) {
    let issued = member.and_then(|m| state.sessions.issue(&m).map(|token| (m, token)));

    match issued {
        Ok((member, token)) => {
            let jar = jar.add(session_cookie(&state.settings.session, token));
            redirect_with(jar, HOME_PATH, Ok(greeting(&member)))
        }
        Err(e) => redirect_with(jar, LOGIN_PATH, Err(e)),
    }
}
