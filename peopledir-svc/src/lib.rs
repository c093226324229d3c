//! peopledir-svc library
//!
//! Person directory service. New people are enriched with age, gender and
//! nationality inferred from their first name by three public APIs, then
//! stored unless the exact full name is already present.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod db;
pub mod inference;
pub mod service;

use service::UserService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: UserService,
}

impl AppState {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let users = Router::new()
        .route("/users", get(api::list_users).post(api::create_user))
        .route(
            "/users/:id",
            get(api::get_user)
                .put(api::edit_user)
                .delete(api::delete_user),
        );

    Router::new()
        .merge(users)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
