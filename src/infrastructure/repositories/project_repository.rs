//! Project Repository Implementation
//!
//! Generic CRUD for the `projects` table plus the `project_members` join table.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Filter, Project, ProjectMember, ProjectRepository, Repository};
use crate::infrastructure::database::map_db_error;
use crate::shared::error::AppError;

use super::PgRepository;

/// PostgreSQL project repository.
#[derive(Clone)]
pub struct PgProjectRepository {
    inner: PgRepository<Project>,
}

impl PgProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            inner: PgRepository::new(pool),
        }
    }
}

#[async_trait]
impl Repository<Project> for PgProjectRepository {
    async fn get_all(&self) -> Result<Vec<Project>, AppError> {
        self.inner.get_all().await
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<Project>, AppError> {
        self.inner.find_all(filter).await
    }

    async fn get_by_id(&self, id: i64) -> Result<Project, AppError> {
        self.inner.get_by_id(id).await
    }

    async fn find(&self, filter: &Filter) -> Result<Option<Project>, AppError> {
        self.inner.find(filter).await
    }

    async fn exists(&self, filter: &Filter) -> Result<bool, AppError> {
        self.inner.exists(filter).await
    }

    async fn add(&self, entity: &Project) -> Result<Project, AppError> {
        self.inner.add(entity).await
    }

    async fn update(&self, entity: &Project) -> Result<Project, AppError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        // member links go with the project (ON DELETE CASCADE)
        self.inner.delete(id).await
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn member_links(&self, project_ids: &[i64]) -> Result<Vec<ProjectMember>, AppError> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, member_id
            FROM project_members
            WHERE project_id = ANY($1)
            ORDER BY project_id, member_id
            "#,
        )
        .bind(project_ids.to_vec())
        .fetch_all(self.inner.pool())
        .await
        .map_err(|e| map_db_error("Project member", e))
    }

    async fn set_members(&self, project_id: i64, member_ids: &[i64]) -> Result<(), AppError> {
        let mut tx = self
            .inner
            .pool()
            .begin()
            .await
            .map_err(|e| map_db_error("Project member", e))?;

        sqlx::query("DELETE FROM project_members WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Project member", e))?;

        if !member_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO project_members (project_id, member_id)
                SELECT $1, member_id FROM UNNEST($2::BIGINT[]) AS t(member_id)
                ON CONFLICT (project_id, member_id) DO NOTHING
                "#,
            )
            .bind(project_id)
            .bind(member_ids.to_vec())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error("Project member", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_db_error("Project member", e))?;

        tracing::debug!(project_id, members = member_ids.len(), "project members replaced");
        Ok(())
    }
}
