//! HTTP surface: routes, handlers, extractors and flash messages.

pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod routes;
