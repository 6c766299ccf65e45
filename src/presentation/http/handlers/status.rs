//! Status Handlers

use axum::{
    extract::{rejection::FormRejection, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::form_body;
use crate::application::dto::{ResultEnvelope, StatusDto, StatusForm, StatusesView};
use crate::presentation::http::extractors::{AuthUser, EntityId};
use crate::presentation::http::flash::{redirect_with, take_flash};
use crate::shared::error::AppError;
use crate::startup::AppState;

const STATUSES_PATH: &str = "/statuses";

pub async fn list_statuses(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<StatusesView>), AppError> {
    let statuses = state.services.statuses.list_statuses().await?;
    let (jar, flash) = take_flash(jar);

    Ok((
        jar,
        Json(StatusesView {
            current_member: user.into(),
            statuses,
            flash,
        }),
    ))
}

pub async fn get_status(State(state): State<AppState>, EntityId(id): EntityId) -> ResultEnvelope<StatusDto> {
    state.services.statuses.get_status(id).await.into()
}

pub async fn add_status(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<StatusForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .statuses
            .add_status(form)
            .await
            .map(|s| format!("Status '{}' was added", s.status_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, STATUSES_PATH, outcome)
}

pub async fn update_status(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    form: Result<Form<StatusForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .statuses
            .update_status(id, form)
            .await
            .map(|s| format!("Status '{}' was updated", s.status_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, STATUSES_PATH, outcome)
}

pub async fn delete_status(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let outcome = state
        .services
        .statuses
        .delete_status(id)
        .await
        .map(|()| "Status was deleted".to_string());

    redirect_with(jar, STATUSES_PATH, outcome)
}
