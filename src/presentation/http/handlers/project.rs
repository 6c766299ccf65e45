//! Project Handlers
//!
//! Available to every signed-in member.

use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::form_body;
use crate::application::dto::{ProjectDto, ProjectForm, ProjectQueryParams, ProjectsView, ResultEnvelope};
use crate::presentation::http::extractors::{AuthUser, EntityId};
use crate::presentation::http::flash::{redirect_with, take_flash};
use crate::shared::error::AppError;
use crate::startup::AppState;

const PROJECTS_PATH: &str = "/projects";

/// Projects page view model, optionally filtered by `?status=ID`
pub async fn list_projects(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
    Query(params): Query<ProjectQueryParams>,
) -> Result<(CookieJar, Json<ProjectsView>), AppError> {
    let services = &state.services;
    let (projects, statuses, clients, members) = tokio::try_join!(
        services.projects.list_projects(params.status),
        services.statuses.list_statuses(),
        services.clients.list_clients(),
        services.members.list_members(),
    )?;
    let (jar, flash) = take_flash(jar);

    Ok((
        jar,
        Json(ProjectsView {
            current_member: user.into(),
            projects,
            selected_status: params.status.map(|id| id.to_string()),
            statuses,
            clients,
            members: members.into_iter().map(Into::into).collect(),
            flash,
        }),
    ))
}

/// Project data for the edit form
pub async fn get_project(State(state): State<AppState>, EntityId(id): EntityId) -> ResultEnvelope<ProjectDto> {
    state.services.projects.get_project(id).await.into()
}

pub async fn add_project(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<ProjectForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .projects
            .add_project(form)
            .await
            .map(|p| format!("Project '{}' was added", p.project_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, PROJECTS_PATH, outcome)
}

pub async fn update_project(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    form: Result<Form<ProjectForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .projects
            .update_project(id, form)
            .await
            .map(|p| format!("Project '{}' was updated", p.project_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, PROJECTS_PATH, outcome)
}

pub async fn delete_project(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let outcome = state
        .services
        .projects
        .delete_project(id)
        .await
        .map(|()| "Project was deleted".to_string());

    redirect_with(jar, PROJECTS_PATH, outcome)
}
