//! # Domain Entities
//!
//! Persisted records of the project hub. Each maps directly to one table and
//! implements [`Entity`](crate::domain::repository::Entity) so the generic
//! repository can store it.
//!
//! - **Client**: the customer a project is delivered for
//! - **Project**: a piece of work for a client, in a status, with members
//! - **Member**: a person and login account
//! - **Status**: a stage a project can be in

mod client;
mod member;
mod project;
mod status;

pub use client::Client;
pub use member::Member;
pub use project::{Project, ProjectMember, ProjectRepository};
pub use status::Status;
