//! Data Transfer Objects
//!
//! Form bodies coming in and view models going out.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
