//! User Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the user router with the PostgreSQL repository
pub fn user_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    user_router_generic(repo, config)
}

/// Create a user router for any repository implementation
pub fn user_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route(
            "/me",
            get(handlers::me::<R>).patch(handlers::update_me::<R>),
        )
        .with_state(state)
}
