//! mockall doubles of the repository traits for service unit tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::{Client, Filter, Member, Project, ProjectMember, ProjectRepository, Repository, Status};
use crate::shared::error::AppError;

mock! {
    pub Clients {}

    #[async_trait]
    impl Repository<Client> for Clients {
        async fn get_all(&self) -> Result<Vec<Client>, AppError>;
        async fn find_all(&self, filter: &Filter) -> Result<Vec<Client>, AppError>;
        async fn get_by_id(&self, id: i64) -> Result<Client, AppError>;
        async fn find(&self, filter: &Filter) -> Result<Option<Client>, AppError>;
        async fn exists(&self, filter: &Filter) -> Result<bool, AppError>;
        async fn add(&self, entity: &Client) -> Result<Client, AppError>;
        async fn update(&self, entity: &Client) -> Result<Client, AppError>;
        async fn delete(&self, id: i64) -> Result<(), AppError>;
    }
}

mock! {
    pub Statuses {}

    #[async_trait]
    impl Repository<Status> for Statuses {
        async fn get_all(&self) -> Result<Vec<Status>, AppError>;
        async fn find_all(&self, filter: &Filter) -> Result<Vec<Status>, AppError>;
        async fn get_by_id(&self, id: i64) -> Result<Status, AppError>;
        async fn find(&self, filter: &Filter) -> Result<Option<Status>, AppError>;
        async fn exists(&self, filter: &Filter) -> Result<bool, AppError>;
        async fn add(&self, entity: &Status) -> Result<Status, AppError>;
        async fn update(&self, entity: &Status) -> Result<Status, AppError>;
        async fn delete(&self, id: i64) -> Result<(), AppError>;
    }
}

mock! {
    pub Members {}

    #[async_trait]
    impl Repository<Member> for Members {
        async fn get_all(&self) -> Result<Vec<Member>, AppError>;
        async fn find_all(&self, filter: &Filter) -> Result<Vec<Member>, AppError>;
        async fn get_by_id(&self, id: i64) -> Result<Member, AppError>;
        async fn find(&self, filter: &Filter) -> Result<Option<Member>, AppError>;
        async fn exists(&self, filter: &Filter) -> Result<bool, AppError>;
        async fn add(&self, entity: &Member) -> Result<Member, AppError>;
        async fn update(&self, entity: &Member) -> Result<Member, AppError>;
        async fn delete(&self, id: i64) -> Result<(), AppError>;
    }
}

mock! {
    pub Projects {}

    #[async_trait]
    impl Repository<Project> for Projects {
        async fn get_all(&self) -> Result<Vec<Project>, AppError>;
        async fn find_all(&self, filter: &Filter) -> Result<Vec<Project>, AppError>;
        async fn get_by_id(&self, id: i64) -> Result<Project, AppError>;
        async fn find(&self, filter: &Filter) -> Result<Option<Project>, AppError>;
        async fn exists(&self, filter: &Filter) -> Result<bool, AppError>;
        async fn add(&self, entity: &Project) -> Result<Project, AppError>;
        async fn update(&self, entity: &Project) -> Result<Project, AppError>;
        async fn delete(&self, id: i64) -> Result<(), AppError>;
    }

    #[async_trait]
    impl ProjectRepository for Projects {
        async fn member_links(&self, project_ids: &[i64]) -> Result<Vec<ProjectMember>, AppError>;
        async fn set_members(&self, project_id: i64, member_ids: &[i64]) -> Result<(), AppError>;
    }
}
