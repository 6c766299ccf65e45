//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Sign-up, sign-in, session tokens and password hashing
//! - **ClientService**: Client management
//! - **MemberService**: Team member accounts
//! - **ProjectService**: Projects and their member assignments
//! - **StatusService**: Project statuses

pub mod auth_service;
pub mod client_service;
pub mod member_service;
pub mod project_service;
pub mod status_service;

#[cfg(test)]
pub(crate) mod mocks;

use std::sync::Arc;

use crate::infrastructure::repositories::Repositories;
use crate::shared::snowflake::SnowflakeGenerator;

pub use auth_service::{hash_password, verify_password, AuthService, AuthServiceImpl, SessionClaims, SessionTokens};
pub use client_service::{ClientService, ClientServiceImpl};
pub use member_service::{MemberService, MemberServiceImpl};
pub use project_service::{ProjectService, ProjectServiceImpl};
pub use status_service::{StatusService, StatusServiceImpl};

/// Every service, behind its trait, as handlers reach them.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub clients: Arc<dyn ClientService>,
    pub members: Arc<dyn MemberService>,
    pub projects: Arc<dyn ProjectService>,
    pub statuses: Arc<dyn StatusService>,
}

impl Services {
    /// Wire the services onto one set of repositories.
    pub fn new(repos: &Repositories, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            auth: Arc::new(AuthServiceImpl::new(repos.members.clone(), id_generator.clone())),
            clients: Arc::new(ClientServiceImpl::new(
                repos.clients.clone(),
                repos.projects.clone(),
                id_generator.clone(),
            )),
            members: Arc::new(MemberServiceImpl::new(repos.members.clone(), id_generator.clone())),
            projects: Arc::new(ProjectServiceImpl::new(
                repos.projects.clone(),
                repos.clients.clone(),
                repos.statuses.clone(),
                repos.members.clone(),
                id_generator.clone(),
            )),
            statuses: Arc::new(StatusServiceImpl::new(
                repos.statuses.clone(),
                repos.projects.clone(),
                id_generator,
            )),
        }
    }
}
