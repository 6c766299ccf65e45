//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! - **PgRepository<T>** - generic CRUD for any [`Entity`](crate::domain::Entity)
//!   (clients, statuses, members)
//! - **PgProjectRepository** - projects plus the project-member join table
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use project_hub::domain::{Client, Filter, Repository};
//! use project_hub::infrastructure::repositories::PgRepository;
//!
//! let clients = PgRepository::<Client>::new(pool.clone());
//! let taken = clients.exists(&Filter::eq_ignore_case("client_name", "Acme")).await?;
//! ```

mod pg_repository;
mod project_repository;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::{Client, Member, ProjectRepository, Repository, Status};

pub use pg_repository::PgRepository;
pub use project_repository::PgProjectRepository;

/// The repositories every request can reach, behind their traits.
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn Repository<Client>>,
    pub statuses: Arc<dyn Repository<Status>>,
    pub members: Arc<dyn Repository<Member>>,
    pub projects: Arc<dyn ProjectRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            clients: Arc::new(PgRepository::<Client>::new(pool.clone())),
            statuses: Arc::new(PgRepository::<Status>::new(pool.clone())),
            members: Arc::new(PgRepository::<Member>::new(pool.clone())),
            projects: Arc::new(PgProjectRepository::new(pool)),
        }
    }
}
