//! # Project Hub Library
//!
//! Back office for a small agency: clients, projects, project statuses and
//! team members, with session-cookie sign-in.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, filter predicates and repository traits
//! - **Application Layer**: Business services, forms and view models
//! - **Infrastructure Layer**: PostgreSQL pool, migrations and repositories
//! - **Presentation Layer**: HTTP routes, handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! project_hub/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects and repository traits
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Database and repository implementations
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Errors, mapping, Snowflake ids, validation
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Logging
pub mod telemetry;
