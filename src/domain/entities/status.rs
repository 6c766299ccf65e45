//! Project status entity.
//!
//! Maps to the `statuses` table. Seeded with "Started" and "Completed".

use chrono::{DateTime, Utc};

use crate::domain::repository::Entity;
use crate::domain::value_objects::Value;

/// A stage a project can be in.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Status {
    pub id: i64,

    /// Unique ignoring case
    pub status_name: String,

    /// Position in lists; the lowest is the default for new projects
    pub sort_order: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Status {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            status_name: String::new(),
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Status {
    const TABLE: &'static str = "statuses";
    const NAME: &'static str = "Status";
    const COLUMNS: &'static [&'static str] =
        &["id", "status_name", "sort_order", "created_at", "updated_at"];
    const ORDER_BY: &'static str = "sort_order";

    fn id(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("status_name", self.status_name.clone().into()),
            ("sort_order", self.sort_order.into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
        ]
    }
}
