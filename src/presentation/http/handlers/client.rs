//! Client Handlers

use axum::{
    extract::{rejection::FormRejection, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::form_body;
use crate::application::dto::{ClientDto, ClientForm, ClientsView, ResultEnvelope};
use crate::presentation::http::extractors::{AuthUser, EntityId};
use crate::presentation::http::flash::{redirect_with, take_flash};
use crate::shared::error::AppError;
use crate::startup::AppState;

const CLIENTS_PATH: &str = "/clients";

/// Clients page view model
pub async fn list_clients(
    State(state): State<AppState>,
    user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ClientsView>), AppError> {
    let clients = state.services.clients.list_clients().await?;
    let (jar, flash) = take_flash(jar);

    Ok((
        jar,
        Json(ClientsView {
            current_member: user.into(),
            clients,
            flash,
        }),
    ))
}

/// Client data for the edit form
pub async fn get_client(State(state): State<AppState>, EntityId(id): EntityId) -> ResultEnvelope<ClientDto> {
    state.services.clients.get_client(id).await.into()
}

pub async fn add_client(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<ClientForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .clients
            .add_client(form)
            .await
            .map(|c| format!("Client '{}' was added", c.client_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, CLIENTS_PATH, outcome)
}

pub async fn update_client(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    form: Result<Form<ClientForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let outcome = match form_body(form) {
        Ok(form) => state
            .services
            .clients
            .update_client(id, form)
            .await
            .map(|c| format!("Client '{}' was updated", c.client_name)),
        Err(e) => Err(e),
    };

    redirect_with(jar, CLIENTS_PATH, outcome)
}

pub async fn delete_client(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let outcome = state
        .services
        .clients
        .delete_client(id)
        .await
        .map(|()| "Client was deleted".to_string());

    redirect_with(jar, CLIENTS_PATH, outcome)
}
