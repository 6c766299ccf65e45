//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints. Form posts answer with a `303 See
//! Other` redirect carrying a flash message; reads answer with JSON.

pub mod auth;
pub mod client;
pub mod health;
pub mod member;
pub mod project;
pub mod status;

use axum::extract::rejection::FormRejection;
use axum::Form;

use crate::shared::error::AppError;

/// Unwrap a form body, turning a malformed submission into a bad request.
pub(crate) fn form_body<T>(form: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    form.map(|Form(body)| body)
        .map_err(|e| AppError::BadRequest(format!("The submitted form is invalid: {}", e.body_text())))
}
