//! Client Service
//!
//! Client records: listing, lookup and add/edit/delete with name uniqueness
//! and the rule that a client with projects cannot be deleted.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::application::dto::{ClientDto, ClientForm};
use crate::domain::{Client, Filter, ProjectRepository, Repository};
use crate::map_fields;
use crate::shared::error::AppError;
use crate::shared::mapping::MapTo;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validate_form;

map_fields!(ClientForm => Client { client_name, email, phone, location, image_url });

/// Client service trait
#[async_trait]
pub trait ClientService: Send + Sync {
    /// All clients, ordered by name
    async fn list_clients(&self) -> Result<Vec<ClientDto>, AppError>;

    /// Get client by ID
    async fn get_client(&self, id: i64) -> Result<ClientDto, AppError>;

    /// Add a client; the name must be unused (ignoring case)
    async fn add_client(&self, form: ClientForm) -> Result<ClientDto, AppError>;

    /// Overwrite a client's details
    async fn update_client(&self, id: i64, form: ClientForm) -> Result<ClientDto, AppError>;

    /// Delete a client that has no projects
    async fn delete_client(&self, id: i64) -> Result<(), AppError>;
}

/// ClientService implementation
pub struct ClientServiceImpl {
    clients: Arc<dyn Repository<Client>>,
    projects: Arc<dyn ProjectRepository>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl ClientServiceImpl {
    pub fn new(
        clients: Arc<dyn Repository<Client>>,
        projects: Arc<dyn ProjectRepository>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            clients,
            projects,
            id_generator,
        }
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i64>) -> Result<(), AppError> {
        let mut filter = Filter::eq_ignore_case("client_name", name);
        if let Some(id) = except {
            filter = filter.and(Filter::not_eq("id", id));
        }

        if self.clients.exists(&filter).await? {
            return Err(AppError::Conflict(format!(
                "A client named '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ClientService for ClientServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<ClientDto>, AppError> {
        let clients = self.clients.get_all().await?;
        Ok(clients.iter().map(|c| c.map_to()).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_client(&self, id: i64) -> Result<ClientDto, AppError> {
        Ok(self.clients.get_by_id(id).await?.map_to())
    }

    #[tracing::instrument(skip(self, form), fields(client_name = %form.client_name))]
    async fn add_client(&self, form: ClientForm) -> Result<ClientDto, AppError> {
        validate_form(&form)?;
        self.ensure_name_free(&form.client_name, None).await?;

        let mut client: Client = form.map_to();
        client.id = self.id_generator.generate();

        let client = self.clients.add(&client).await?;
        tracing::info!(client_id = client.id, "client added");

        Ok(client.map_to())
    }

    #[tracing::instrument(skip(self, form))]
    async fn update_client(&self, id: i64, form: ClientForm) -> Result<ClientDto, AppError> {
        validate_form(&form)?;
        let existing = self.clients.get_by_id(id).await?;
        self.ensure_name_free(&form.client_name, Some(id)).await?;

        let mut client: Client = form.map_to();
        client.id = id;
        client.created_at = existing.created_at;
        client.updated_at = Utc::now();

        let client = self.clients.update(&client).await?;
        tracing::info!(client_id = id, "client updated");

        Ok(client.map_to())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_client(&self, id: i64) -> Result<(), AppError> {
        let client = self.clients.get_by_id(id).await?;

        if self.projects.exists(&Filter::eq("client_id", id)).await? {
            return Err(AppError::Conflict(format!(
                "Client '{}' has projects and cannot be deleted",
                client.client_name
            )));
        }

        self.clients.delete(id).await?;
        tracing::info!(client_id = id, "client deleted");
        Ok(())
    }
}
