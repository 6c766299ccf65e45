//! Status Service
//!
//! Project statuses. Names are unique ignoring case and a status still used
//! by a project cannot be deleted.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{StatusDto, StatusForm};
use crate::domain::{Filter, ProjectRepository, Repository, Status};
use crate::shared::error::AppError;
use crate::shared::mapping::MapTo;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validate_form;

/// Status service trait
#[async_trait]
pub trait StatusService: Send + Sync {
    /// All statuses in sort order
    async fn list_statuses(&self) -> Result<Vec<StatusDto>, AppError>;

    async fn get_status(&self, id: i64) -> Result<StatusDto, AppError>;

    /// Add a status; without a sort order it goes last
    async fn add_status(&self, form: StatusForm) -> Result<StatusDto, AppError>;

    async fn update_status(&self, id: i64, form: StatusForm) -> Result<StatusDto, AppError>;

    /// Delete a status no project uses
    async fn delete_status(&self, id: i64) -> Result<(), AppError>;
}

/// StatusService implementation
pub struct StatusServiceImpl {
    statuses: Arc<dyn Repository<Status>>,
    projects: Arc<dyn ProjectRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl StatusServiceImpl {
    pub fn new(
        statuses: Arc<dyn Repository<Status>>,
        projects: Arc<dyn ProjectRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            statuses,
            projects,
            id_generator,
        }
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i64>) -> Result<(), AppError> {
        let mut filter = Filter::eq_ignore_case("status_name", name);
        if let Some(id) = except {
            filter = filter.and(Filter::not_eq("id", id));
        }

        if self.statuses.exists(&filter).await? {
            return Err(AppError::Conflict(format!(
                "A status named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    async fn next_sort_order(&self) -> Result<i64, AppError> {
        let statuses = self.statuses.get_all().await?;
        match statuses.iter().map(|s| s.sort_order).max() {
            None => Ok(0),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                AppError::Validation("Sort order is out of range".to_string())
            }),
        }
    }
}

#[async_trait]
impl StatusService for StatusServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn list_statuses(&self) -> Result<Vec<StatusDto>, AppError> {
        let statuses = self.statuses.get_all().await?;
        Ok(statuses.iter().map(|s| s.map_to()).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_status(&self, id: i64) -> Result<StatusDto, AppError> {
        Ok(self.statuses.get_by_id(id).await?.map_to())
    }

    #[tracing::instrument(skip(self, form), fields(status_name = %form.status_name))]
    async fn add_status(&self, form: StatusForm) -> Result<StatusDto, AppError> {
        validate_form(&form)?;
        self.ensure_name_free(&form.status_name, None).await?;

        let sort_order = match form.sort_order {
            Some(order) => order,
            None => self.next_sort_order().await?,
        };

        let status = Status {
            id: self.id_generator.generate(),
            status_name: form.status_name,
            sort_order,
            ..Default::default()
        };

        let status = self.statuses.add(&status).await?;
        tracing::info!(status_id = status.id, "status added");

        Ok(status.map_to())
    }

    #[tracing::instrument(skip(self, form))]
    async fn update_status(&self, id: i64, form: StatusForm) -> Result<StatusDto, AppError> {
        validate_form(&form)?;
        let existing = self.statuses.get_by_id(id).await?;
        self.ensure_name_free(&form.status_name, Some(id)).await?;

        let status = Status {
            status_name: form.status_name,
            sort_order: form.sort_order.unwrap_or(existing.sort_order),
            updated_at: Utc::now(),
            ..existing
        };

        let status = self.statuses.update(&status).await?;
        tracing::info!(status_id = id, "status updated");

        Ok(status.map_to())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_status(&self, id: i64) -> Result<(), AppError> {
        let status = self.statuses.get_by_id(id).await?;

        if self.projects.exists(&Filter::eq("status_id", id)).await? {
            return Err(AppError::Conflict(format!(
                "Status '{}' is used by projects and cannot be deleted",
                status.status_name
            )));
        }

        self.statuses.delete(id).await?;
        tracing::info!(status_id = id, "status deleted");
        Ok(())
    }
}
