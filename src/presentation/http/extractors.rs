//! Custom Extractors
//!
//! Axum extractors for the signed-in member and entity ids in paths.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::application::dto::CurrentMemberView;
use crate::domain::MemberRole;
use crate::shared::error::AppError;

/// Member resolved from the session cookie by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub member_id: i64,
    pub full_name: String,
    pub role: MemberRole,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Sign in to continue".into()))
    }
}

/// Snowflake id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        raw.parse()
            .map(EntityId)
            .map_err(|_| AppError::BadRequest(format!("'{}' is not a valid id", raw)))
    }
}

impl From<AuthUser> for CurrentMemberView {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.member_id,
            full_name: user.full_name,
            role: user.role,
        }
    }
}
