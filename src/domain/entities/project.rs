//! Project entity, project-member links and the project repository trait.
//!
//! Maps to the `projects` table (client_id and status_id are foreign keys) and
//! the `project_members` join table, whose rows cascade when either side is
//! deleted.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::repository::{Entity, Repository};
use crate::domain::value_objects::Value;
use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub project_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub start_date: NaiveDate,

    /// Never before `start_date`
    pub end_date: Option<NaiveDate>,

    /// Whole currency units
    pub budget: Option<i64>,

    pub client_id: i64,
    pub status_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Project {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            project_name: String::new(),
            description: None,
            image_url: None,
            start_date: now.date_naive(),
            end_date: None,
            budget: None,
            client_id: 0,
            status_id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Project {
    const TABLE: &'static str = "projects";
    const NAME: &'static str = "Project";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "project_name",
        "description",
        "image_url",
        "start_date",
        "end_date",
        "budget",
        "client_id",
        "status_id",
        "created_at",
        "updated_at",
    ];
    const ORDER_BY: &'static str = "start_date";

    fn id(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("project_name", self.project_name.clone().into()),
            ("description", self.description.clone().into()),
            ("image_url", self.image_url.clone().into()),
            ("start_date", self.start_date.into()),
            ("end_date", self.end_date.into()),
            ("budget", self.budget.into()),
            ("client_id", self.client_id.into()),
            ("status_id", self.status_id.into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
        ]
    }
}

/// A row of the `project_members` join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::FromRow)]
pub struct ProjectMember {
    pub project_id: i64,
    pub member_id: i64,
}

/// Project persistence, including the many-to-many member assignment.
#[async_trait]
pub trait ProjectRepository: Repository<Project> {
    /// Member links of the given projects.
    async fn member_links(&self, project_ids: &[i64]) -> Result<Vec<ProjectMember>, AppError>;

    /// Replace the member set of a project.
    async fn set_members(&self, project_id: i64, member_ids: &[i64]) -> Result<(), AppError>;

    /// Member ids assigned to one project.
    async fn member_ids(&self, project_id: i64) -> Result<Vec<i64>, AppError> {
        Ok(self
            .member_links(&[project_id])
            .await?
            .into_iter()
            .map(|link| link.member_id)
            .collect())
    }
}
