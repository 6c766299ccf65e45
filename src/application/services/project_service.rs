//! Project Service
//!
//! Projects with their client, status and assigned members. Lists are
//! assembled from batch lookups (one query per related table) instead of one
//! query per project.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{MemberSummaryDto, ProjectDto, ProjectForm};
use crate::domain::{Client, Entity, Filter, Member, Project, ProjectRepository, Repository, Status};
use crate::map_fields;
use crate::shared::error::AppError;
use crate::shared::mapping::MapTo;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validate_form;

map_fields!(ProjectForm => Project {
    project_name, description, image_url, start_date, end_date, budget, client_id,
});

/// Project service trait
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// Projects ordered by start date, optionally only those in one status
    async fn list_projects(&self, status_id: Option<i64>) -> Result<Vec<ProjectDto>, AppError>;

    async fn get_project(&self, id: i64) -> Result<ProjectDto, AppError>;

    /// Add a project; without a status it starts in the first status
    async fn add_project(&self, form: ProjectForm) -> Result<ProjectDto, AppError>;

    /// Overwrite a project and replace its member set
    async fn update_project(&self, id: i64, form: ProjectForm) -> Result<ProjectDto, AppError>;

    async fn delete_project(&self, id: i64) -> Result<(), AppError>;
}

/// ProjectService implementation
pub struct ProjectServiceImpl {
    projects: Arc<dyn ProjectRepository>,
    clients: Arc<dyn Repository<Client>>,
    statuses: Arc<dyn Repository<Status>>,
    members: Arc<dyn Repository<Member>>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl ProjectServiceImpl {
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        clients: Arc<dyn Repository<Client>>,
        statuses: Arc<dyn Repository<Status>>,
        members: Arc<dyn Repository<Member>>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            projects,
            clients,
            statuses,
            members,
            id_generator,
        }
    }

    /// Resolve clients, statuses and members for a batch of projects.
    async fn assemble(&self, projects: Vec<Project>) -> Result<Vec<ProjectDto>, AppError> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
        let links = self.projects.member_links(&project_ids).await?;

        let clients: HashMap<i64, Client> = self
            .clients
            .find_all(&Filter::is_in("id", distinct(projects.iter().map(|p| p.client_id))))
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let statuses: HashMap<i64, Status> = self
            .statuses
            .find_all(&Filter::is_in("id", distinct(projects.iter().map(|p| p.status_id))))
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let members: HashMap<i64, Member> = self
            .members
            .find_all(&Filter::is_in("id", distinct(links.iter().map(|l| l.member_id))))
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let mut assigned: HashMap<i64, Vec<MemberSummaryDto>> = HashMap::new();
        for link in &links {
            if let Some(member) = members.get(&link.member_id) {
                assigned
                    .entry(link.project_id)
                    .or_default()
                    .push(MemberSummaryDto::from(member));
            }
        }

        Ok(projects
            .iter()
            .map(|project| {
                let mut dto: ProjectDto = project.map_to();
                dto.client_name = clients
                    .get(&project.client_id)
                    .map(|c| c.client_name.clone())
                    .unwrap_or_default();
                dto.status_name = statuses
                    .get(&project.status_id)
                    .map(|s| s.status_name.clone())
                    .unwrap_or_default();
                dto.members = assigned.remove(&project.id).unwrap_or_default();
                dto
            })
            .collect())
    }

    async fn assemble_one(&self, project: Project) -> Result<ProjectDto, AppError> {
        let id = project.id;
        self.assemble(vec![project])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found(Project::NAME, id))
    }

    /// Check the form's dates and that everything it references exists.
    async fn check_references(&self, form: &ProjectForm, status_id: i64) -> Result<(), AppError> {
        if matches!(form.end_date, Some(end) if end < form.start_date) {
            return Err(AppError::Validation(
                "End date cannot be before the start date".into(),
            ));
        }

        if !self.clients.exists(&Filter::eq("id", form.client_id)).await? {
            return Err(AppError::Validation("Select an existing client".into()));
        }

        if !self.statuses.exists(&Filter::eq("id", status_id)).await? {
            return Err(AppError::Validation("Select an existing status".into()));
        }

        if !form.member_ids.is_empty() {
            let found = self
                .members
                .find_all(&Filter::is_in("id", form.member_ids.iter().copied()))
                .await?;
            if found.len() != form.member_ids.len() {
                return Err(AppError::Validation(
                    "One or more selected members do not exist".into(),
                ));
            }
        }

        Ok(())
    }

    async fn default_status(&self) -> Result<i64, AppError> {
        self.statuses
            .find(&Filter::all())
            .await?
            .map(|s| s.id)
            .ok_or_else(|| AppError::Validation("Add a status before adding projects".into()))
    }
}

fn distinct(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn list_projects(&self, status_id: Option<i64>) -> Result<Vec<ProjectDto>, AppError> {
        let projects = match status_id {
            Some(status_id) => {
                self.projects
                    .find_all(&Filter::eq("status_id", status_id))
                    .await?
            }
            None => self.projects.get_all().await?,
        };

        self.assemble(projects).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_project(&self, id: i64) -> Result<ProjectDto, AppError> {
        let project = self.projects.get_by_id(id).await?;
        self.assemble_one(project).await
    }

    #[tracing::instrument(skip(self, form), fields(project_name = %form.project_name))]
    async fn add_project(&self, form: ProjectForm) -> Result<ProjectDto, AppError> {
        validate_form(&form)?;
        let status_id = match form.status_id {
            Some(id) => id,
            None => self.default_status().await?,
        };
        self.check_references(&form, status_id).await?;

        let mut project: Project = form.map_to();
        project.id = self.id_generator.generate();
        project.status_id = status_id;

        let project = self.projects.add(&project).await?;
        self.projects.set_members(project.id, &form.member_ids).await?;
        tracing::info!(project_id = project.id, members = form.member_ids.len(), "project added");

        self.assemble_one(project).await
    }

    #[tracing::instrument(skip(self, form))]
    async fn update_project(&self, id: i64, form: ProjectForm) -> Result<ProjectDto, AppError> {
        validate_form(&form)?;
        let existing = self.projects.get_by_id(id).await?;
        let status_id = form.status_id.unwrap_or(existing.status_id);
        self.check_references(&form, status_id).await?;

        let mut project: Project = form.map_to();
        project.id = id;
        project.status_id = status_id;
        project.created_at = existing.created_at;
        project.updated_at = Utc::now();

        let project = self.projects.update(&project).await?;
        self.projects.set_members(id, &form.member_ids).await?;
        tracing::info!(project_id = id, members = form.member_ids.len(), "project updated");

        self.assemble_one(project).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_project(&self, id: i64) -> Result<(), AppError> {
        self.projects.delete(id).await?;
        tracing::info!(project_id = id, "project deleted");
        Ok(())
    }
}
