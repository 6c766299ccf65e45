//! Value Objects
//!
//! Immutable value types shared by entities and repositories.

mod filter;
mod role;

pub use filter::{Filter, Value};
pub use role::{MemberRole, UnknownRole};
