//! Client entity.
//!
//! Maps to the `clients` table:
//! - id: BIGINT PRIMARY KEY (Snowflake ID)
//! - client_name: VARCHAR(100) NOT NULL, unique ignoring case
//! - email, phone, location, image_url: nullable TEXT
//! - created_at / updated_at: TIMESTAMPTZ NOT NULL

use chrono::{DateTime, Utc};

use crate::domain::repository::Entity;
use crate::domain::value_objects::Value;

/// A customer that projects are delivered for.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Client {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Display name, unique ignoring case
    pub client_name: String,

    /// Contact email
    pub email: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Office location or address line
    pub location: Option<String>,

    /// URL of the client logo
    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Client {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            client_name: String::new(),
            email: None,
            phone: None,
            location: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Client {
    const TABLE: &'static str = "clients";
    const NAME: &'static str = "Client";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "client_name",
        "email",
        "phone",
        "location",
        "image_url",
        "created_at",
        "updated_at",
    ];
    const ORDER_BY: &'static str = "client_name";

    fn id(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("client_name", self.client_name.clone().into()),
            ("email", self.email.clone().into()),
            ("phone", self.phone.clone().into()),
            ("location", self.location.clone().into()),
            ("image_url", self.image_url.clone().into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
        ]
    }
}
