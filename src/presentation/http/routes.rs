//! Route Configuration
//!
//! Configures all HTTP routes: public auth pages, member pages (projects) and
//! administrator pages (clients, members, statuses).

use axum::{
    middleware,
    response::Redirect,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::presentation::middleware::{admin_middleware, auth_middleware, security_headers};
use crate::startup::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(handlers::auth::HOME_PATH) }))
        .nest("/auth", auth_routes())
        .merge(project_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .layer(middleware::from_fn_with_state(state.clone(), security_headers))
        .with_state(state)
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(handlers::auth::login_page).post(handlers::auth::login))
        .route("/signup", post(handlers::auth::signup))
        .route("/logout", post(handlers::auth::logout))
}

/// Project routes (any signed-in member)
fn project_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(handlers::project::list_projects).post(handlers::project::add_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::project::get_project).post(handlers::project::update_project),
        )
        .route("/projects/{id}/delete", post(handlers::project::delete_project))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Administrator routes
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(handlers::client::list_clients).post(handlers::client::add_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::client::get_client).post(handlers::client::update_client),
        )
        .route("/clients/{id}/delete", post(handlers::client::delete_client))
        .route(
            "/members",
            get(handlers::member::list_members).post(handlers::member::add_member),
        )
        .route(
            "/members/{id}",
            get(handlers::member::get_member).post(handlers::member::update_member),
        )
        .route("/members/{id}/delete", post(handlers::member::delete_member))
        .route(
            "/statuses",
            get(handlers::status::list_statuses).post(handlers::status::add_status),
        )
        .route(
            "/statuses/{id}",
            get(handlers::status::get_status).post(handlers::status::update_status),
        )
        .route("/statuses/{id}/delete", post(handlers::status::delete_status))
        // runs inside auth_middleware, which is added last and so runs first
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
