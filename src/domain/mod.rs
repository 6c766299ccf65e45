//! # Domain Layer
//!
//! Entities, value objects and the repository contracts. Nothing here knows
//! about HTTP or a concrete store.
//!
//! ## Structure
//!
//! - **entities**: Client, Project, Member, Status
//! - **value_objects**: filter predicates and member roles
//! - **repository**: the `Entity` description and generic `Repository` trait

pub mod entities;
pub mod repository;
pub mod value_objects;

pub use entities::*;
pub use repository::{Entity, Repository};
pub use value_objects::*;
