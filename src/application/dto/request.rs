//! Request DTOs
//!
//! Form bodies posted by the admin pages (`application/x-www-form-urlencoded`).
//! Text inputs are trimmed on the way in and blank optional inputs become
//! `None`, so validation and uniqueness checks see normalized values.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};
use validator::Validate;

use crate::domain::MemberRole;

/// Login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Enter your password"))]
    pub password: String,
}

/// Self-service sign-up form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    #[serde(default, deserialize_with = "checkbox")]
    #[validate(custom(function = "must_be_checked", message = "You must accept the terms and conditions"))]
    pub accept_terms: bool,
}

/// Client add/edit form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ClientForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Client name must be 1-100 characters"))]
    pub client_name: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Status add/edit form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StatusForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "Status name must be 1-50 characters"))]
    pub status_name: String,

    /// Position in lists; appended at the end when absent
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 0, max = 1_000_000, message = "Sort order must be between 0 and 1000000"))]
    pub sort_order: Option<i64>,
}

/// Member form used by administrators to create accounts
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddMemberForm {
    #[serde(flatten)]
    pub profile: MemberProfileForm,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Member profile fields, shared by add and edit
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MemberProfileForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub job_title: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub street_address: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub postal_code: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_of_birth: Option<NaiveDate>,

    /// Defaults to `user` when absent
    #[serde(default, deserialize_with = "empty_as_none")]
    pub role: Option<MemberRole>,
}

/// Project add/edit form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Project name must be 1-100 characters"))]
    pub project_name: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,

    pub start_date: NaiveDate,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(range(min = 0, message = "Budget cannot be negative"))]
    pub budget: Option<i64>,

    pub client_id: i64,

    /// Defaults to the first status on add, unchanged on edit
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status_id: Option<i64>,

    /// Comma-separated member ids
    #[serde(default, deserialize_with = "id_list")]
    pub member_ids: Vec<i64>,
}

/// Project list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQueryParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<i64>,
}

fn must_be_checked(value: &bool) -> Result<(), validator::ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(validator::ValidationError::new("unchecked"))
    }
}

/// Deserialize a string, trimming surrounding whitespace.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

/// Deserialize an optional value from a string; blank input is `None`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an HTML checkbox: present and not "false" means checked.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(raw.as_deref().map(str::trim), Some(v) if !v.is_empty() && !v.eq_ignore_ascii_case("false")))
}

/// Deserialize a comma-separated list of ids, ignoring blanks and duplicates.
fn id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let mut ids = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id: i64 = part
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid member id '{}'", part)))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
