//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod logging;
pub mod security;

pub use auth::{admin_middleware, auth_middleware, clear_session, session_cookie, LOGIN_PATH};
pub use security::security_headers;
