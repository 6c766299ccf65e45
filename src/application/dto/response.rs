//! Response DTOs
//!
//! Shapes returned to the admin pages: entity DTOs, the list-page view models,
//! and the result envelope used by the edit-modal endpoints. Ids are
//! serialized as strings because Snowflake ids exceed the integer precision of
//! JavaScript numbers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::{Client, Member, MemberRole, Project, Status};
use crate::map_fields;
use crate::shared::error::AppError;

fn id_string<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

/// Client data transfer object
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientDto {
    #[serde(serialize_with = "id_string")]
    pub id: i64,
    pub client_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

map_fields!(Client => ClientDto {
    id, client_name, email, phone, location, image_url, created_at, updated_at,
});

/// Status data transfer object
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusDto {
    #[serde(serialize_with = "id_string")]
    pub id: i64,
    pub status_name: String,
    pub sort_order: i64,
}

map_fields!(Status => StatusDto { id, status_name, sort_order });

/// Member data transfer object; never carries the password hash
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberDto {
    #[serde(serialize_with = "id_string")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub image_url: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: MemberRole,
}

map_fields!(Member => MemberDto {
    id, first_name, last_name, email, phone, job_title, image_url,
    street_address, postal_code, city, date_of_birth, role,
});

impl From<&Member> for MemberDto {
    fn from(member: &Member) -> Self {
        use crate::shared::mapping::MapTo;

        MemberDto {
            full_name: member.full_name(),
            ..member.map_to()
        }
    }
}

/// Member as shown on a project card
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberSummaryDto {
    #[serde(serialize_with = "id_string")]
    pub id: i64,
    pub full_name: String,
    pub job_title: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Member> for MemberSummaryDto {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name(),
            job_title: member.job_title.clone(),
            image_url: member.image_url.clone(),
        }
    }
}

impl From<MemberDto> for MemberSummaryDto {
    fn from(member: MemberDto) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name,
            job_title: member.job_title,
            image_url: member.image_url,
        }
    }
}

/// Project with its client, status and members resolved
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectDto {
    #[serde(serialize_with = "id_string")]
    pub id: i64,
    pub project_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<i64>,
    #[serde(serialize_with = "id_string")]
    pub client_id: i64,
    pub client_name: String,
    #[serde(serialize_with = "id_string")]
    pub status_id: i64,
    pub status_name: String,
    pub members: Vec<MemberSummaryDto>,
}

map_fields!(Project => ProjectDto {
    id, project_name, description, image_url, start_date, end_date, budget, client_id, status_id,
});

/// Kind of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot message shown after a redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Signed-in member, as shown in the page header
#[derive(Debug, Clone, Serialize)]
pub struct CurrentMemberView {
    #[serde(serialize_with = "id_string")]
    pub id: i64,
    pub full_name: String,
    pub role: MemberRole,
}

/// Login page
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub flash: Option<Flash>,
}

/// Clients page
#[derive(Debug, Serialize)]
pub struct ClientsView {
    pub current_member: CurrentMemberView,
    pub clients: Vec<ClientDto>,
    pub flash: Option<Flash>,
}

/// Statuses page
#[derive(Debug, Serialize)]
pub struct StatusesView {
    pub current_member: CurrentMemberView,
    pub statuses: Vec<StatusDto>,
    pub flash: Option<Flash>,
}

/// Members page
#[derive(Debug, Serialize)]
pub struct MembersView {
    pub current_member: CurrentMemberView,
    pub members: Vec<MemberDto>,
    pub flash: Option<Flash>,
}

/// Projects page, with the lookup lists its add/edit forms need
#[derive(Debug, Serialize)]
pub struct ProjectsView {
    pub current_member: CurrentMemberView,
    pub projects: Vec<ProjectDto>,
    pub selected_status: Option<String>,
    pub statuses: Vec<StatusDto>,
    pub clients: Vec<ClientDto>,
    pub members: Vec<MemberSummaryDto>,
    pub flash: Option<Flash>,
}

/// Outcome of an operation: success flag, status code, message and payload.
#[derive(Debug, Serialize)]
pub struct ResultEnvelope<T> {
    pub succeeded: bool,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ResultEnvelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            succeeded: true,
            status_code: StatusCode::OK.as_u16(),
            error: None,
            result: Some(result),
        }
    }

    pub fn failed(error: &AppError) -> Self {
        Self {
            succeeded: false,
            status_code: error.status_code().as_u16(),
            error: Some(error.public_message()),
            result: None,
        }
    }
}

impl<T> From<Result<T, AppError>> for ResultEnvelope<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(error) => Self::failed(&error),
        }
    }
}

impl<T: Serialize> IntoResponse for ResultEnvelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
