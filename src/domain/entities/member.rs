//! Member entity.
//!
//! A member is both a person who can be assigned to projects and a login
//! account. Maps to the `members` table; `email` is unique ignoring case and
//! `role` is stored as lowercase text.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::repository::Entity;
use crate::domain::value_objects::{MemberRole, Value};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,

    /// Login name, unique ignoring case
    pub email: String,

    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub image_url: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    #[sqlx(try_from = "String")]
    pub role: MemberRole,

    /// Argon2 PHC string
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Default for Member {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: None,
            job_title: None,
            image_url: None,
            street_address: None,
            postal_code: None,
            city: None,
            date_of_birth: None,
            role: MemberRole::User,
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Member {
    const TABLE: &'static str = "members";
    const NAME: &'static str = "Member";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "job_title",
        "image_url",
        "street_address",
        "postal_code",
        "city",
        "date_of_birth",
        "role",
        "password_hash",
        "created_at",
        "updated_at",
    ];
    const ORDER_BY: &'static str = "first_name";

    fn id(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("email", self.email.clone().into()),
            ("phone", self.phone.clone().into()),
            ("job_title", self.job_title.clone().into()),
            ("image_url", self.image_url.clone().into()),
            ("street_address", self.street_address.clone().into()),
            ("postal_code", self.postal_code.clone().into()),
            ("city", self.city.clone().into()),
            ("date_of_birth", self.date_of_birth.into()),
            ("role", self.role.as_str().into()),
            ("password_hash", self.password_hash.clone().into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
        ]
    }
}
