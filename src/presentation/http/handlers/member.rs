//! Member Handlers
//!
//! Administrator management of team member accounts.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::form_body;
use crate::application::dto::{AddMemberForm, MemberDto, MemberProfileForm, MembersView, ResultEnvelope};
use crate::presentation::http::extractors::{AuthUser, EntityId};
use crate::presentation::http::flash::{redirect_with, take_flash};
use crate::shared::error::AppError;
use crate::startup::AppState;

const MEMBERS_PATH: &str = "/members";

pub async fn list_members(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MembersView>), AppError> {
    let members = state.services.members.list_members().await?;
    let (jar, flash) = take_flash(jar);

    Ok((
        jar,
        Json(MembersView {
            current_member: user.into(),
            members,
            flash,
        }),
    ))
}

pub async fn get_member(State(state): State<AppState>, EntityId(id): EntityId) -> ResultEnvelope<MemberDto> {
    state.services.members.get_member(id).await.into()
}

pub async fn add_member(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<AddMemberForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .members
            .add_member(form)
            .await
            .map(|m| format!("{} was added", m.full_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, MEMBERS_PATH, outcome)
}

pub async fn update_member(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    form: Result<Form<MemberProfileForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .members
            .update_member(id, form)
            .await
            .map(|m| format!("{} was updated", m.full_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, MEMBERS_PATH, outcome)
}

pub async fn delete_member(
    State(state): State<AppState>,
    user: AuthUser,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let outcome = state
        .services
        .members
        .delete_member(user.member_id, id)
        .await
        .map(|()| "Member was deleted".to_string());

    redirect_with(jar, MEMBERS_PATH, outcome)
}
